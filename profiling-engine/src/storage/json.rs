// JSON Execution Store
// Persists each execution as `<dir>/<execution id>.json`

use crate::error::{EngineError, EngineResult};
use crate::storage::models::Execution;
use crate::storage::ExecutionStore;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct JsonExecutionStore {
    directory: PathBuf,
}

impl JsonExecutionStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn execution_path(&self, id: Uuid) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }

    /// Read a stored execution back
    pub async fn load(&self, id: Uuid) -> EngineResult<Execution> {
        let path = self.execution_path(id);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            EngineError::storage(format!("could not read {}", path.display())).with_source(e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            EngineError::storage(format!("could not parse {}", path.display())).with_source(e)
        })
    }
}

#[async_trait]
impl ExecutionStore for JsonExecutionStore {
    async fn store(&self, execution: &Execution) -> EngineResult<()> {
        tokio::fs::create_dir_all(&self.directory).await.map_err(|e| {
            EngineError::storage(format!(
                "could not create {}",
                self.directory.display()
            ))
            .with_source(e)
        })?;

        let json = serde_json::to_string_pretty(execution).map_err(|e| {
            EngineError::storage("could not serialize execution").with_source(e)
        })?;

        let path = self.execution_path(execution.id);
        tokio::fs::write(&path, json).await.map_err(|e| {
            EngineError::storage(format!("could not write {}", path.display())).with_source(e)
        })
    }
}
