// Execution Events
// Run lifecycle events and leveled log messages for algorithm executions

use crate::capability::Capability;
use crate::error::ErrorKind;
use crate::results::model::ResultKind;

use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Sender for execution events
pub type ProgressSender = mpsc::UnboundedSender<ExecutionEvent>;

/// Receiver for execution events
pub type EventReceiver = mpsc::UnboundedReceiver<ExecutionEvent>;

/// Create a new event channel
pub fn progress_channel() -> (ProgressSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Events emitted while an algorithm is loaded, configured, executed and stored
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    /// Algorithm loaded, run about to be prepared
    RunStarted {
        algorithm: String,
        result_path_prefix: String,
    },

    /// Capability set of the loaded algorithm
    CapabilitiesResolved {
        algorithm: String,
        capabilities: Vec<Capability>,
    },

    ConfigurationApplied {
        identifier: String,
        kind: &'static str,
    },

    /// Algorithm reported a valid progress value
    ProgressUpdated { progress: f32 },

    ResultReceived { kind: ResultKind },

    /// Execute returned successfully
    RunCompleted {
        algorithm: String,
        duration: Duration,
    },

    RunFailed {
        algorithm: String,
        kind: ErrorKind,
        message: String,
    },

    ExecutionStored { execution_id: Uuid },

    /// Log message (debug, info, warning, error)
    Log { level: LogLevel, message: String },
}

/// Log level for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl ExecutionEvent {
    /// Create a run started event
    pub fn run_started(
        algorithm: impl Into<String>,
        result_path_prefix: impl Into<String>,
    ) -> Self {
        Self::RunStarted {
            algorithm: algorithm.into(),
            result_path_prefix: result_path_prefix.into(),
        }
    }

    pub fn capabilities_resolved(
        algorithm: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        Self::CapabilitiesResolved {
            algorithm: algorithm.into(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    pub fn configuration_applied(identifier: impl Into<String>, kind: &'static str) -> Self {
        Self::ConfigurationApplied {
            identifier: identifier.into(),
            kind,
        }
    }

    /// Create a run completed event
    pub fn run_completed(algorithm: impl Into<String>, duration: Duration) -> Self {
        Self::RunCompleted {
            algorithm: algorithm.into(),
            duration,
        }
    }

    /// Create a run failed event
    pub fn run_failed(
        algorithm: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::RunFailed {
            algorithm: algorithm.into(),
            kind,
            message: message.into(),
        }
    }

    /// Create a debug log event
    pub fn debug(message: impl Into<String>) -> Self {
        Self::Log {
            level: LogLevel::Debug,
            message: message.into(),
        }
    }

    /// Create an info log event
    pub fn info(message: impl Into<String>) -> Self {
        Self::Log {
            level: LogLevel::Info,
            message: message.into(),
        }
    }

    /// Create a warning log event
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Log {
            level: LogLevel::Warning,
            message: message.into(),
        }
    }

    /// Create an error log event
    pub fn error(message: impl Into<String>) -> Self {
        Self::Log {
            level: LogLevel::Error,
            message: message.into(),
        }
    }
}

/// Helper trait for sending events, ignoring errors (fire-and-forget)
pub trait EventSender {
    fn send_event(&self, event: ExecutionEvent);
}

impl EventSender for ProgressSender {
    fn send_event(&self, event: ExecutionEvent) {
        let _ = self.send(event);
    }
}

impl EventSender for Option<ProgressSender> {
    fn send_event(&self, event: ExecutionEvent) {
        if let Some(sender) = self {
            let _ = sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_channel() {
        let (tx, mut rx) = progress_channel();

        tx.send_event(ExecutionEvent::run_started("fdep.jar", "run1"));
        tx.send_event(ExecutionEvent::ResultReceived {
            kind: ResultKind::Fd,
        });

        let event1 = rx.recv().await.unwrap();
        assert!(matches!(event1, ExecutionEvent::RunStarted { .. }));

        let event2 = rx.recv().await.unwrap();
        assert!(matches!(
            event2,
            ExecutionEvent::ResultReceived {
                kind: ResultKind::Fd
            }
        ));
    }

    #[test]
    fn test_event_construction() {
        let event = ExecutionEvent::run_failed("fdep.jar", ErrorKind::Execution, "boom");

        if let ExecutionEvent::RunFailed {
            algorithm,
            kind,
            message,
        } = event
        {
            assert_eq!(algorithm, "fdep.jar");
            assert_eq!(kind, ErrorKind::Execution);
            assert_eq!(message, "boom");
        } else {
            panic!("wrong event type");
        }
    }

    #[test]
    fn test_optional_sender() {
        let sender: Option<ProgressSender> = None;
        // Should not panic
        sender.send_event(ExecutionEvent::info("test"));
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (tx, rx) = progress_channel();
        drop(rx);
        tx.send_event(ExecutionEvent::warning("nobody listening"));
    }
}
