// In-Memory Execution Store
// Keeps stored executions in process, for tests and embedded hosts

use crate::error::EngineResult;
use crate::storage::models::Execution;
use crate::storage::ExecutionStore;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct MemoryExecutionStore {
    executions: Arc<RwLock<Vec<Execution>>>,
}

impl MemoryExecutionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All executions stored so far, oldest first
    pub async fn executions(&self) -> Vec<Execution> {
        self.executions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.executions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.executions.read().await.is_empty()
    }
}

#[async_trait]
impl ExecutionStore for MemoryExecutionStore {
    async fn store(&self, execution: &Execution) -> EngineResult<()> {
        self.executions.write().await.push(execution.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::AlgorithmDescriptor;

    #[tokio::test]
    async fn test_store_and_list() {
        let store = MemoryExecutionStore::new();
        assert!(store.is_empty().await);

        let execution = Execution::new(AlgorithmDescriptor::new("a.jar", "A"), 10, "run1");
        store.store(&execution).await.unwrap();

        let executions = store.executions().await;
        assert_eq!(executions.len(), 1);
        assert_eq!(executions[0].id, execution.id);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let store = MemoryExecutionStore::new();
        let other = store.clone();

        let execution = Execution::new(AlgorithmDescriptor::new("a.jar", "A"), 10, "run1");
        other.store(&execution).await.unwrap();

        assert_eq!(store.len().await, 1);
    }
}
