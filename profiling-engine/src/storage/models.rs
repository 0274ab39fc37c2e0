// Execution Records
// The persisted record of one algorithm run and its result artifacts

use crate::resources::Input;
use crate::results::model::{result_file_name, ResultKind};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored description of a loadable algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmDescriptor {
    #[serde(default)]
    pub id: Option<i64>,
    /// File name the algorithm is registered under
    pub file_name: String,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl AlgorithmDescriptor {
    pub fn new(file_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            file_name: file_name.into(),
            name: name.into(),
            author: None,
            description: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A produced result artifact of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// `<prefix>_<kind>`
    pub file_name: String,
    pub kind: ResultKind,
    #[serde(default)]
    pub execution_id: Option<Uuid>,
}

impl ResultRecord {
    pub fn new(prefix: &str, kind: ResultKind) -> Self {
        Self {
            file_name: result_file_name(prefix, kind),
            kind,
            execution_id: None,
        }
    }
}

/// A completed run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: Uuid,
    pub algorithm: AlgorithmDescriptor,
    /// Wall-clock start, epoch milliseconds
    pub begin: i64,
    /// `begin` plus the elapsed run time in whole milliseconds
    pub end: i64,
    pub result_path_prefix: String,
    #[serde(default)]
    pub inputs: Vec<Input>,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

impl Execution {
    pub fn new(
        algorithm: AlgorithmDescriptor,
        begin: i64,
        result_path_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            algorithm,
            begin,
            end: begin,
            result_path_prefix: result_path_prefix.into(),
            inputs: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Set the end timestamp; it never precedes `begin`
    pub fn with_end(mut self, end: i64) -> Self {
        self.end = end.max(self.begin);
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<Input>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Attach results, stamping each with this execution's id
    pub fn with_results(mut self, results: Vec<ResultRecord>) -> Self {
        self.results = results
            .into_iter()
            .map(|mut record| {
                record.execution_id = Some(self.id);
                record
            })
            .collect();
        self
    }

    pub fn duration_millis(&self) -> i64 {
        self.end - self.begin
    }
}
