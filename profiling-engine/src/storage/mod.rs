// Storage Module
// Execution records and the stores that persist them

pub mod json;
pub mod memory;
pub mod models;

use crate::error::EngineResult;

use async_trait::async_trait;

// Re-export key types
pub use json::JsonExecutionStore;
pub use memory::MemoryExecutionStore;
pub use models::{AlgorithmDescriptor, Execution, ResultRecord};

/// Persists completed executions
#[async_trait]
pub trait ExecutionStore: Send + Sync {
    /// Store one execution. Failures are storage errors.
    async fn store(&self, execution: &Execution) -> EngineResult<()>;
}
