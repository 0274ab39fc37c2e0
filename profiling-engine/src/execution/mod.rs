// Execution Module
// Run orchestration and the events it reports

pub mod events;
pub mod orchestrator;

// Re-export key types
pub use events::{
    progress_channel, EventReceiver, EventSender, ExecutionEvent, LogLevel, ProgressSender,
};
pub use orchestrator::ExecutionOrchestrator;
