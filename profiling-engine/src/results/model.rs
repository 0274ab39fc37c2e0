// Profiling Result Models
// Column references and the closed set of result types algorithms produce

use crate::capability::Capability;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the column combination and its conditions
pub const CUCC_SEPARATOR: &str = " | ";

/// Kind tag of a result, one per result-producing capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Fd,
    Ind,
    Ucc,
    Cucc,
    Od,
    Stat,
}

impl ResultKind {
    pub const ALL: [ResultKind; 6] = [
        ResultKind::Fd,
        ResultKind::Ind,
        ResultKind::Ucc,
        ResultKind::Cucc,
        ResultKind::Od,
        ResultKind::Stat,
    ];

    /// Short tag used to address result artifacts
    pub fn tag(&self) -> &'static str {
        match self {
            ResultKind::Fd => "fd",
            ResultKind::Ind => "ind",
            ResultKind::Ucc => "ucc",
            ResultKind::Cucc => "cucc",
            ResultKind::Od => "od",
            ResultKind::Stat => "stat",
        }
    }

    /// The capability that produces this kind of result
    pub fn capability(&self) -> Capability {
        match self {
            ResultKind::Fd => Capability::FunctionalDependency,
            ResultKind::Ind => Capability::InclusionDependency,
            ResultKind::Ucc => Capability::UniqueColumnCombination,
            ResultKind::Cucc => Capability::ConditionalUniqueColumnCombination,
            ResultKind::Od => Capability::OrderDependency,
            ResultKind::Stat => Capability::BasicStatistics,
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for ResultKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResultKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown result kind '{}'. Valid kinds: fd, ind, ucc, cucc, od, stat",
                    s
                )
            })
    }
}

/// Name of the artifact holding one kind of result for a run: `<prefix>_<kind>`
pub fn result_file_name(prefix: &str, kind: ResultKind) -> String {
    format!("{}_{}", prefix, kind.tag())
}

/// A column of a table
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnIdentifier {
    pub table_identifier: String,
    pub column_identifier: String,
}

impl ColumnIdentifier {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table_identifier: table.into(),
            column_identifier: column.into(),
        }
    }

    fn is_well_formed(&self) -> bool {
        !self.table_identifier.is_empty() && !self.column_identifier.is_empty()
    }
}

impl fmt::Display for ColumnIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table_identifier, self.column_identifier)
    }
}

/// An unordered set of columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColumnCombination {
    pub columns: Vec<ColumnIdentifier>,
}

impl ColumnCombination {
    pub fn new(columns: impl IntoIterator<Item = ColumnIdentifier>) -> Self {
        let mut columns: Vec<ColumnIdentifier> = columns.into_iter().collect();
        columns.sort();
        columns.dedup();
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn is_well_formed(&self) -> bool {
        self.columns.iter().all(ColumnIdentifier::is_well_formed)
    }
}

impl fmt::Display for ColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_column_list(f, &self.columns)
    }
}

/// An ordered list of columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColumnPermutation {
    pub columns: Vec<ColumnIdentifier>,
}

impl ColumnPermutation {
    pub fn new(columns: impl IntoIterator<Item = ColumnIdentifier>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn is_well_formed(&self) -> bool {
        !self.columns.is_empty() && self.columns.iter().all(ColumnIdentifier::is_well_formed)
    }
}

impl fmt::Display for ColumnPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_column_list(f, &self.columns)
    }
}

fn write_column_list(f: &mut fmt::Formatter<'_>, columns: &[ColumnIdentifier]) -> fmt::Result {
    write!(f, "[")?;
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", column)?;
    }
    write!(f, "]")
}

/// A value condition on a single column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnCondition {
    pub column: ColumnIdentifier,
    pub value: String,
    #[serde(default)]
    pub negated: bool,
}

impl fmt::Display for ColumnCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = if self.negated { "!=" } else { "=" };
        write!(f, "{}{}{}", self.column, operator, self.value)
    }
}

/// Determinant columns functionally determine the dependant column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionalDependency {
    pub determinant: ColumnCombination,
    pub dependant: ColumnIdentifier,
}

impl fmt::Display for FunctionalDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.determinant, self.dependant)
    }
}

/// Values of the dependant columns are contained in the referenced columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InclusionDependency {
    pub dependant: ColumnPermutation,
    pub referenced: ColumnPermutation,
}

impl fmt::Display for InclusionDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [= {}", self.dependant, self.referenced)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueColumnCombination {
    pub column_combination: ColumnCombination,
}

impl fmt::Display for UniqueColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_combination)
    }
}

/// A column combination that is unique under the given conditions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalUniqueColumnCombination {
    pub column_combination: ColumnCombination,
    pub conditions: Vec<ColumnCondition>,
}

impl fmt::Display for ConditionalUniqueColumnCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_combination, CUCC_SEPARATOR)?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", condition)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Lexicographical,
    Pointwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "<")]
    Smaller,
    #[serde(rename = "<=")]
    SmallerEqual,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = ">")]
    Greater,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            ComparisonOperator::Smaller => "<",
            ComparisonOperator::SmallerEqual => "<=",
            ComparisonOperator::Equal => "=",
            ComparisonOperator::GreaterEqual => ">=",
            ComparisonOperator::Greater => ">",
        };
        write!(f, "{}", symbol)
    }
}

/// Ordering the left-hand side columns orders the right-hand side columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDependency {
    pub lhs: ColumnPermutation,
    pub rhs: ColumnPermutation,
    pub order_type: OrderType,
    pub comparison_operator: ComparisonOperator,
}

impl fmt::Display for OrderDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.order_type {
            OrderType::Lexicographical => "",
            OrderType::Pointwise => "P",
        };
        write!(
            f,
            "{} ~{}{}~> {}",
            self.lhs, self.comparison_operator, marker, self.rhs
        )
    }
}

/// A named statistic over one or more columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicStatistic {
    pub statistic_name: String,
    pub value: serde_json::Value,
    pub columns: Vec<ColumnIdentifier>,
}

impl fmt::Display for BasicStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.statistic_name)?;
        write_column_list(f, &self.columns)?;
        write!(f, ") = {}", self.value)
    }
}

/// Every result an algorithm can hand to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result", rename_all = "lowercase")]
pub enum ProfilingResult {
    #[serde(rename = "fd")]
    FunctionalDependency(FunctionalDependency),
    #[serde(rename = "ind")]
    InclusionDependency(InclusionDependency),
    #[serde(rename = "ucc")]
    UniqueColumnCombination(UniqueColumnCombination),
    #[serde(rename = "cucc")]
    ConditionalUniqueColumnCombination(ConditionalUniqueColumnCombination),
    #[serde(rename = "od")]
    OrderDependency(OrderDependency),
    #[serde(rename = "stat")]
    BasicStatistic(BasicStatistic),
}

impl ProfilingResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            ProfilingResult::FunctionalDependency(_) => ResultKind::Fd,
            ProfilingResult::InclusionDependency(_) => ResultKind::Ind,
            ProfilingResult::UniqueColumnCombination(_) => ResultKind::Ucc,
            ProfilingResult::ConditionalUniqueColumnCombination(_) => ResultKind::Cucc,
            ProfilingResult::OrderDependency(_) => ResultKind::Od,
            ProfilingResult::BasicStatistic(_) => ResultKind::Stat,
        }
    }

    /// Describe why the result is malformed, if it is
    pub fn malformation(&self) -> Option<String> {
        match self {
            ProfilingResult::FunctionalDependency(fd) => {
                if !fd.dependant.is_well_formed() {
                    Some("dependant column has an empty identifier".to_string())
                } else if !fd.determinant.is_well_formed() {
                    Some("determinant contains an empty column identifier".to_string())
                } else {
                    None
                }
            }
            ProfilingResult::InclusionDependency(ind) => {
                if !ind.dependant.is_well_formed() || !ind.referenced.is_well_formed() {
                    Some("inclusion dependency sides must name at least one column".to_string())
                } else if ind.dependant.len() != ind.referenced.len() {
                    Some(format!(
                        "dependant has {} columns but referenced has {}",
                        ind.dependant.len(),
                        ind.referenced.len()
                    ))
                } else {
                    None
                }
            }
            ProfilingResult::UniqueColumnCombination(ucc) => {
                check_combination(&ucc.column_combination)
            }
            ProfilingResult::ConditionalUniqueColumnCombination(cucc) => {
                check_combination(&cucc.column_combination).or_else(|| {
                    cucc.conditions
                        .iter()
                        .any(|c| !c.column.is_well_formed())
                        .then(|| "condition refers to an empty column identifier".to_string())
                })
            }
            ProfilingResult::OrderDependency(od) => {
                if !od.lhs.is_well_formed() || !od.rhs.is_well_formed() {
                    Some("order dependency sides must name at least one column".to_string())
                } else {
                    None
                }
            }
            ProfilingResult::BasicStatistic(stat) => {
                if stat.statistic_name.is_empty() {
                    Some("statistic has no name".to_string())
                } else if !stat.columns.iter().all(ColumnIdentifier::is_well_formed) {
                    Some("statistic refers to an empty column identifier".to_string())
                } else {
                    None
                }
            }
        }
    }
}

fn check_combination(combination: &ColumnCombination) -> Option<String> {
    if combination.is_empty() {
        Some("column combination is empty".to_string())
    } else if !combination.is_well_formed() {
        Some("column combination contains an empty column identifier".to_string())
    } else {
        None
    }
}

impl fmt::Display for ProfilingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfilingResult::FunctionalDependency(r) => write!(f, "{}", r),
            ProfilingResult::InclusionDependency(r) => write!(f, "{}", r),
            ProfilingResult::UniqueColumnCombination(r) => write!(f, "{}", r),
            ProfilingResult::ConditionalUniqueColumnCombination(r) => write!(f, "{}", r),
            ProfilingResult::OrderDependency(r) => write!(f, "{}", r),
            ProfilingResult::BasicStatistic(r) => write!(f, "{}", r),
        }
    }
}
