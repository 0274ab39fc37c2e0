// Resource Resolution
// Looks up the registered files, tables and connections that configuration settings refer to

use crate::error::{EngineError, EngineResult};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Reference from a configuration setting to a registered resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum ResourceReference {
    FileInput(i64),
    TableInput(i64),
    DatabaseConnection(i64),
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceReference::FileInput(id) => write!(f, "file input {}", id),
            ResourceReference::TableInput(id) => write!(f, "table input {}", id),
            ResourceReference::DatabaseConnection(id) => write!(f, "database connection {}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    File,
    Table,
    DatabaseConnection,
}

/// A resolved input recorded on the execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Input {
    pub id: i64,
    pub kind: InputKind,
    /// File path, table name or connection url
    pub identifier: String,
}

impl Input {
    pub fn new(id: i64, kind: InputKind, identifier: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            identifier: identifier.into(),
        }
    }
}

/// Resolves resource references to inputs
pub trait ResourceResolver: Send + Sync {
    fn resolve(&self, reference: &ResourceReference) -> EngineResult<Input>;
}

/// Resolver backed by in-process registrations
#[derive(Debug, Clone, Default)]
pub struct InMemoryResourceResolver {
    inputs: HashMap<ResourceReference, Input>,
}

impl InMemoryResourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_file(&mut self, id: i64, path: impl Into<String>) -> &mut Self {
        self.inputs.insert(
            ResourceReference::FileInput(id),
            Input::new(id, InputKind::File, path),
        );
        self
    }

    pub fn register_table(&mut self, id: i64, table: impl Into<String>) -> &mut Self {
        self.inputs.insert(
            ResourceReference::TableInput(id),
            Input::new(id, InputKind::Table, table),
        );
        self
    }

    pub fn register_database_connection(&mut self, id: i64, url: impl Into<String>) -> &mut Self {
        self.inputs.insert(
            ResourceReference::DatabaseConnection(id),
            Input::new(id, InputKind::DatabaseConnection, url),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl ResourceResolver for InMemoryResourceResolver {
    fn resolve(&self, reference: &ResourceReference) -> EngineResult<Input> {
        self.inputs
            .get(reference)
            .cloned()
            .ok_or_else(|| EngineError::configuration(format!("unknown {}", reference)))
    }
}
