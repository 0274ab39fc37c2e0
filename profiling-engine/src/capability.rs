// Capability Registry
// Fixed set of optional algorithm capabilities and the analyzer that queries them

use crate::algorithm::{
    Algorithm, BasicStatisticsAlgorithm, BooleanParameterAlgorithm, CheckBoxParameterAlgorithm,
    ConditionalUniqueColumnCombinationAlgorithm, DatabaseConnectionParameterAlgorithm,
    FileInputParameterAlgorithm, FunctionalDependencyAlgorithm, InclusionDependencyAlgorithm,
    IntegerParameterAlgorithm, ListBoxParameterAlgorithm, OrderDependencyAlgorithm,
    ProgressEstimatingAlgorithm, StringParameterAlgorithm, TableInputParameterAlgorithm,
    TempFileAlgorithm, UniqueColumnCombinationAlgorithm,
};
use crate::results::model::ResultKind;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An optional contract an algorithm may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    FunctionalDependency,
    InclusionDependency,
    UniqueColumnCombination,
    ConditionalUniqueColumnCombination,
    OrderDependency,
    BasicStatistics,
    StringConfiguration,
    BooleanConfiguration,
    IntegerConfiguration,
    ListBoxConfiguration,
    CheckBoxConfiguration,
    FileInputConfiguration,
    TableInputConfiguration,
    DatabaseConnectionConfiguration,
    TempFiles,
    ProgressEstimation,
}

impl Capability {
    /// Every capability the engine knows about
    pub const ALL: [Capability; 16] = [
        Capability::FunctionalDependency,
        Capability::InclusionDependency,
        Capability::UniqueColumnCombination,
        Capability::ConditionalUniqueColumnCombination,
        Capability::OrderDependency,
        Capability::BasicStatistics,
        Capability::StringConfiguration,
        Capability::BooleanConfiguration,
        Capability::IntegerConfiguration,
        Capability::ListBoxConfiguration,
        Capability::CheckBoxConfiguration,
        Capability::FileInputConfiguration,
        Capability::TableInputConfiguration,
        Capability::DatabaseConnectionConfiguration,
        Capability::TempFiles,
        Capability::ProgressEstimation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Capability::FunctionalDependency => "produces-functional-dependencies",
            Capability::InclusionDependency => "produces-inclusion-dependencies",
            Capability::UniqueColumnCombination => "produces-unique-column-combinations",
            Capability::ConditionalUniqueColumnCombination => {
                "produces-conditional-unique-column-combinations"
            }
            Capability::OrderDependency => "produces-order-dependencies",
            Capability::BasicStatistics => "produces-basic-statistics",
            Capability::StringConfiguration => "accepts-string-configuration",
            Capability::BooleanConfiguration => "accepts-boolean-configuration",
            Capability::IntegerConfiguration => "accepts-integer-configuration",
            Capability::ListBoxConfiguration => "accepts-list-box-configuration",
            Capability::CheckBoxConfiguration => "accepts-check-box-configuration",
            Capability::FileInputConfiguration => "accepts-file-input-configuration",
            Capability::TableInputConfiguration => "accepts-table-input-configuration",
            Capability::DatabaseConnectionConfiguration => {
                "accepts-database-connection-configuration"
            }
            Capability::TempFiles => "requests-temp-files",
            Capability::ProgressEstimation => "reports-progress",
        }
    }

    /// The result kind this capability produces, if it produces results
    pub fn result_kind(&self) -> Option<ResultKind> {
        match self {
            Capability::FunctionalDependency => Some(ResultKind::Fd),
            Capability::InclusionDependency => Some(ResultKind::Ind),
            Capability::UniqueColumnCombination => Some(ResultKind::Ucc),
            Capability::ConditionalUniqueColumnCombination => Some(ResultKind::Cucc),
            Capability::OrderDependency => Some(ResultKind::Od),
            Capability::BasicStatistics => Some(ResultKind::Stat),
            _ => None,
        }
    }

    /// The capability that produces results of the given kind
    pub fn producing(kind: ResultKind) -> Capability {
        match kind {
            ResultKind::Fd => Capability::FunctionalDependency,
            ResultKind::Ind => Capability::InclusionDependency,
            ResultKind::Ucc => Capability::UniqueColumnCombination,
            ResultKind::Cucc => Capability::ConditionalUniqueColumnCombination,
            ResultKind::Od => Capability::OrderDependency,
            ResultKind::Stat => Capability::BasicStatistics,
        }
    }

    pub fn is_result_producing(&self) -> bool {
        self.result_kind().is_some()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The capabilities one algorithm instance declares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    capabilities: BTreeSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.capabilities.insert(capability)
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.capabilities.iter().copied()
    }

    /// Result kinds produced by the capabilities in this set
    pub fn result_kinds(&self) -> impl Iterator<Item = ResultKind> + '_ {
        self.iter().filter_map(|c| c.result_kind())
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            capabilities: iter.into_iter().collect(),
        }
    }
}

/// Typed access to an algorithm through one of its capabilities
pub enum CapabilityHandle<'a> {
    FunctionalDependency(&'a mut dyn FunctionalDependencyAlgorithm),
    InclusionDependency(&'a mut dyn InclusionDependencyAlgorithm),
    UniqueColumnCombination(&'a mut dyn UniqueColumnCombinationAlgorithm),
    ConditionalUniqueColumnCombination(&'a mut dyn ConditionalUniqueColumnCombinationAlgorithm),
    OrderDependency(&'a mut dyn OrderDependencyAlgorithm),
    BasicStatistics(&'a mut dyn BasicStatisticsAlgorithm),
    StringConfiguration(&'a mut dyn StringParameterAlgorithm),
    BooleanConfiguration(&'a mut dyn BooleanParameterAlgorithm),
    IntegerConfiguration(&'a mut dyn IntegerParameterAlgorithm),
    ListBoxConfiguration(&'a mut dyn ListBoxParameterAlgorithm),
    CheckBoxConfiguration(&'a mut dyn CheckBoxParameterAlgorithm),
    FileInputConfiguration(&'a mut dyn FileInputParameterAlgorithm),
    TableInputConfiguration(&'a mut dyn TableInputParameterAlgorithm),
    DatabaseConnectionConfiguration(&'a mut dyn DatabaseConnectionParameterAlgorithm),
    TempFiles(&'a mut dyn TempFileAlgorithm),
    ProgressEstimation(&'a mut dyn ProgressEstimatingAlgorithm),
}

impl CapabilityHandle<'_> {
    pub fn capability(&self) -> Capability {
        match self {
            CapabilityHandle::FunctionalDependency(_) => Capability::FunctionalDependency,
            CapabilityHandle::InclusionDependency(_) => Capability::InclusionDependency,
            CapabilityHandle::UniqueColumnCombination(_) => Capability::UniqueColumnCombination,
            CapabilityHandle::ConditionalUniqueColumnCombination(_) => {
                Capability::ConditionalUniqueColumnCombination
            }
            CapabilityHandle::OrderDependency(_) => Capability::OrderDependency,
            CapabilityHandle::BasicStatistics(_) => Capability::BasicStatistics,
            CapabilityHandle::StringConfiguration(_) => Capability::StringConfiguration,
            CapabilityHandle::BooleanConfiguration(_) => Capability::BooleanConfiguration,
            CapabilityHandle::IntegerConfiguration(_) => Capability::IntegerConfiguration,
            CapabilityHandle::ListBoxConfiguration(_) => Capability::ListBoxConfiguration,
            CapabilityHandle::CheckBoxConfiguration(_) => Capability::CheckBoxConfiguration,
            CapabilityHandle::FileInputConfiguration(_) => Capability::FileInputConfiguration,
            CapabilityHandle::TableInputConfiguration(_) => Capability::TableInputConfiguration,
            CapabilityHandle::DatabaseConnectionConfiguration(_) => {
                Capability::DatabaseConnectionConfiguration
            }
            CapabilityHandle::TempFiles(_) => Capability::TempFiles,
            CapabilityHandle::ProgressEstimation(_) => Capability::ProgressEstimation,
        }
    }
}

/// Determines which capabilities an algorithm instance implements
pub struct CapabilityAnalyzer;

impl CapabilityAnalyzer {
    /// Get a typed handle on the algorithm if it implements the capability
    pub fn implements<'a>(
        algorithm: &'a mut dyn Algorithm,
        capability: Capability,
    ) -> Option<CapabilityHandle<'a>> {
        match capability {
            Capability::FunctionalDependency => algorithm
                .as_functional_dependency()
                .map(CapabilityHandle::FunctionalDependency),
            Capability::InclusionDependency => algorithm
                .as_inclusion_dependency()
                .map(CapabilityHandle::InclusionDependency),
            Capability::UniqueColumnCombination => algorithm
                .as_unique_column_combination()
                .map(CapabilityHandle::UniqueColumnCombination),
            Capability::ConditionalUniqueColumnCombination => algorithm
                .as_conditional_unique_column_combination()
                .map(CapabilityHandle::ConditionalUniqueColumnCombination),
            Capability::OrderDependency => algorithm
                .as_order_dependency()
                .map(CapabilityHandle::OrderDependency),
            Capability::BasicStatistics => algorithm
                .as_basic_statistics()
                .map(CapabilityHandle::BasicStatistics),
            Capability::StringConfiguration => algorithm
                .as_string_parameter()
                .map(CapabilityHandle::StringConfiguration),
            Capability::BooleanConfiguration => algorithm
                .as_boolean_parameter()
                .map(CapabilityHandle::BooleanConfiguration),
            Capability::IntegerConfiguration => algorithm
                .as_integer_parameter()
                .map(CapabilityHandle::IntegerConfiguration),
            Capability::ListBoxConfiguration => algorithm
                .as_list_box_parameter()
                .map(CapabilityHandle::ListBoxConfiguration),
            Capability::CheckBoxConfiguration => algorithm
                .as_check_box_parameter()
                .map(CapabilityHandle::CheckBoxConfiguration),
            Capability::FileInputConfiguration => algorithm
                .as_file_input_parameter()
                .map(CapabilityHandle::FileInputConfiguration),
            Capability::TableInputConfiguration => algorithm
                .as_table_input_parameter()
                .map(CapabilityHandle::TableInputConfiguration),
            Capability::DatabaseConnectionConfiguration => algorithm
                .as_database_connection_parameter()
                .map(CapabilityHandle::DatabaseConnectionConfiguration),
            Capability::TempFiles => algorithm.as_temp_file().map(CapabilityHandle::TempFiles),
            Capability::ProgressEstimation => algorithm
                .as_progress_estimating()
                .map(CapabilityHandle::ProgressEstimation),
        }
    }

    /// Compute the full capability set of an algorithm
    pub fn capabilities_of(algorithm: &mut dyn Algorithm) -> CapabilitySet {
        let mut capabilities = CapabilitySet::new();
        for capability in Capability::ALL {
            if Self::implements(&mut *algorithm, capability).is_some() {
                capabilities.insert(capability);
            }
        }
        capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{DependencyDiscovery, PlainAlgorithm};

    #[test]
    fn test_plain_algorithm_has_no_capabilities() {
        let mut algorithm = PlainAlgorithm::default();
        let capabilities = CapabilityAnalyzer::capabilities_of(&mut algorithm);

        assert!(capabilities.is_empty());
        assert!(CapabilityAnalyzer::implements(&mut algorithm, Capability::TempFiles).is_none());
    }

    #[test]
    fn test_declared_capabilities_are_found() {
        let mut algorithm = DependencyDiscovery::default();
        let capabilities = CapabilityAnalyzer::capabilities_of(&mut algorithm);

        assert!(capabilities.has(Capability::FunctionalDependency));
        assert!(capabilities.has(Capability::TempFiles));
        assert!(capabilities.has(Capability::ProgressEstimation));
        assert!(!capabilities.has(Capability::StringConfiguration));
        assert_eq!(capabilities.len(), 3);
        assert_eq!(
            capabilities.result_kinds().collect::<Vec<_>>(),
            vec![ResultKind::Fd]
        );
    }

    #[test]
    fn test_inspection_is_deterministic() {
        let mut algorithm = DependencyDiscovery::default();
        let first = CapabilityAnalyzer::capabilities_of(&mut algorithm);
        let second = CapabilityAnalyzer::capabilities_of(&mut algorithm);
        assert_eq!(first, second);
    }

    #[test]
    fn test_handle_reports_its_capability() {
        let mut algorithm = DependencyDiscovery::default();
        for capability in Capability::ALL {
            if let Some(handle) = CapabilityAnalyzer::implements(&mut algorithm, capability) {
                assert_eq!(handle.capability(), capability);
            }
        }
    }

    #[test]
    fn test_capability_names() {
        assert_eq!(
            Capability::StringConfiguration.to_string(),
            "accepts-string-configuration"
        );
        assert_eq!(Capability::ProgressEstimation.name(), "reports-progress");
        assert!(Capability::BasicStatistics.is_result_producing());
        assert!(!Capability::TempFiles.is_result_producing());
    }

    #[test]
    fn test_producing_matches_result_kind() {
        for kind in ResultKind::ALL {
            assert_eq!(Capability::producing(kind).result_kind(), Some(kind));
        }
    }
}
