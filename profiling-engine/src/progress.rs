// Progress Tracking
// Validated fractional progress shared between the engine and a running algorithm

use crate::execution::events::{EventSender, ExecutionEvent, ProgressSender};

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

/// Accepts progress reports from an algorithm
pub trait ProgressReceiver: Send + Sync {
    /// Report progress in `[0, 1]`. Returns false if the value was rejected.
    fn update_progress(&self, progress: f32) -> bool;
}

/// Retains the last valid progress value
#[derive(Debug, Default)]
pub struct ProgressTracker {
    bits: AtomicU32,
    event_tx: OnceLock<ProgressSender>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(event_tx: ProgressSender) -> Self {
        let tracker = Self::new();
        tracker.attach_events(event_tx);
        tracker
    }

    /// Attach an event channel. Only the first channel attached is kept.
    pub fn attach_events(&self, event_tx: ProgressSender) -> bool {
        self.event_tx.set(event_tx).is_ok()
    }

    /// Last accepted progress value, 0 until the first valid update
    pub fn current_progress(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl ProgressReceiver for ProgressTracker {
    fn update_progress(&self, progress: f32) -> bool {
        // NaN fails both comparisons
        if !(0.0..=1.0).contains(&progress) {
            return false;
        }

        self.bits.store(progress.to_bits(), Ordering::Release);
        if let Some(event_tx) = self.event_tx.get() {
            event_tx.send_event(ExecutionEvent::ProgressUpdated { progress });
        }
        true
    }
}
