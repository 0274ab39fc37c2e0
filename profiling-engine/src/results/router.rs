// Result Router
// Exhaustive dispatch of profiling results to an external result sink

use crate::execution::events::{EventSender, ExecutionEvent, ProgressSender};
use crate::results::model::{
    BasicStatistic, ConditionalUniqueColumnCombination, FunctionalDependency,
    InclusionDependency, OrderDependency, ProfilingResult, ResultKind, UniqueColumnCombination,
};
use crate::results::receiver::{
    BasicStatisticsResultReceiver, ConditionalUniqueColumnCombinationResultReceiver,
    FunctionalDependencyResultReceiver, InclusionDependencyResultReceiver,
    OrderDependencyResultReceiver, UniqueColumnCombinationResultReceiver,
};

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// A result could not be accepted
#[derive(Debug, Error)]
pub enum CouldNotReceiveResult {
    #[error("Result sink is closed")]
    SinkClosed,

    #[error("Malformed {kind} result: {reason}")]
    Malformed { kind: ResultKind, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The first result the router could not deliver
#[derive(Debug, Clone, Error)]
#[error("{kind} result rejected: {reason}")]
pub struct DeliveryFailure {
    pub kind: ResultKind,
    pub reason: String,
}

/// Where routed results end up
pub trait ResultSink: Send {
    fn receive_functional_dependency(
        &mut self,
        result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResult>;

    fn receive_inclusion_dependency(
        &mut self,
        result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResult>;

    fn receive_unique_column_combination(
        &mut self,
        result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult>;

    fn receive_conditional_unique_column_combination(
        &mut self,
        result: ConditionalUniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult>;

    fn receive_order_dependency(
        &mut self,
        result: OrderDependency,
    ) -> Result<(), CouldNotReceiveResult>;

    fn receive_basic_statistic(
        &mut self,
        result: BasicStatistic,
    ) -> Result<(), CouldNotReceiveResult>;

    /// Release the sink. Called at most once by the router.
    fn close(&mut self) -> Result<(), CouldNotReceiveResult>;
}

struct RouterState {
    sink: Box<dyn ResultSink>,
    closed: bool,
    delivered: BTreeMap<ResultKind, usize>,
    first_failure: Option<DeliveryFailure>,
    event_tx: Option<ProgressSender>,
}

/// Receives results from a running algorithm and forwards them to the sink
pub struct ResultRouter {
    state: Mutex<RouterState>,
}

impl ResultRouter {
    pub fn new(sink: Box<dyn ResultSink>) -> Self {
        Self {
            state: Mutex::new(RouterState {
                sink,
                closed: false,
                delivered: BTreeMap::new(),
                first_failure: None,
                event_tx: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Attach an event channel for result notifications
    pub fn set_event_sender(&self, event_tx: ProgressSender) {
        self.lock().event_tx = Some(event_tx);
    }

    /// Validate and deliver a result to the sink
    pub fn receive(&self, result: ProfilingResult) -> Result<(), CouldNotReceiveResult> {
        let mut state = self.lock();
        let kind = result.kind();

        let delivered = if state.closed {
            Err(CouldNotReceiveResult::SinkClosed)
        } else if let Some(reason) = result.malformation() {
            Err(CouldNotReceiveResult::Malformed { kind, reason })
        } else {
            match result {
                ProfilingResult::FunctionalDependency(r) => {
                    state.sink.receive_functional_dependency(r)
                }
                ProfilingResult::InclusionDependency(r) => {
                    state.sink.receive_inclusion_dependency(r)
                }
                ProfilingResult::UniqueColumnCombination(r) => {
                    state.sink.receive_unique_column_combination(r)
                }
                ProfilingResult::ConditionalUniqueColumnCombination(r) => {
                    state.sink.receive_conditional_unique_column_combination(r)
                }
                ProfilingResult::OrderDependency(r) => state.sink.receive_order_dependency(r),
                ProfilingResult::BasicStatistic(r) => state.sink.receive_basic_statistic(r),
            }
        };

        match &delivered {
            Ok(()) => {
                *state.delivered.entry(kind).or_insert(0) += 1;
                state
                    .event_tx
                    .send_event(ExecutionEvent::ResultReceived { kind });
            }
            Err(e) => {
                if state.first_failure.is_none() {
                    state.first_failure = Some(DeliveryFailure {
                        kind,
                        reason: e.to_string(),
                    });
                }
                state
                    .event_tx
                    .send_event(ExecutionEvent::warning(format!("Result rejected: {}", e)));
            }
        }

        delivered
    }

    /// Close the sink. Later calls are no-ops.
    pub fn close(&self) -> Result<(), CouldNotReceiveResult> {
        let mut state = self.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;
        state.sink.close()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// The first delivery that failed, if any
    pub fn first_failure(&self) -> Option<DeliveryFailure> {
        self.lock().first_failure.clone()
    }

    /// Number of results of the given kind delivered so far
    pub fn delivered_count(&self, kind: ResultKind) -> usize {
        self.lock().delivered.get(&kind).copied().unwrap_or(0)
    }
}

impl FunctionalDependencyResultReceiver for ResultRouter {
    fn receive_functional_dependency(
        &self,
        result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.receive(ProfilingResult::FunctionalDependency(result))
    }
}

impl InclusionDependencyResultReceiver for ResultRouter {
    fn receive_inclusion_dependency(
        &self,
        result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.receive(ProfilingResult::InclusionDependency(result))
    }
}

impl UniqueColumnCombinationResultReceiver for ResultRouter {
    fn receive_unique_column_combination(
        &self,
        result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        self.receive(ProfilingResult::UniqueColumnCombination(result))
    }
}

impl ConditionalUniqueColumnCombinationResultReceiver for ResultRouter {
    fn receive_conditional_unique_column_combination(
        &self,
        result: ConditionalUniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        self.receive(ProfilingResult::ConditionalUniqueColumnCombination(result))
    }
}

impl OrderDependencyResultReceiver for ResultRouter {
    fn receive_order_dependency(
        &self,
        result: OrderDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.receive(ProfilingResult::OrderDependency(result))
    }
}

impl BasicStatisticsResultReceiver for ResultRouter {
    fn receive_basic_statistic(&self, result: BasicStatistic) -> Result<(), CouldNotReceiveResult> {
        self.receive(ProfilingResult::BasicStatistic(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::events::progress_channel;
    use crate::results::cache::ResultCache;
    use crate::results::model::{ColumnCombination, ColumnIdentifier};

    fn fd(table: &str) -> FunctionalDependency {
        FunctionalDependency {
            determinant: ColumnCombination::new(vec![ColumnIdentifier::new(table, "a")]),
            dependant: ColumnIdentifier::new(table, "b"),
        }
    }

    #[test]
    fn test_routes_by_kind() {
        let cache = ResultCache::new();
        let router = ResultRouter::new(Box::new(cache.clone()));

        router.receive_functional_dependency(fd("t")).unwrap();
        router
            .receive_unique_column_combination(UniqueColumnCombination {
                column_combination: ColumnCombination::new(vec![ColumnIdentifier::new("t", "id")]),
            })
            .unwrap();

        assert_eq!(router.delivered_count(ResultKind::Fd), 1);
        assert_eq!(router.delivered_count(ResultKind::Ucc), 1);
        assert_eq!(router.delivered_count(ResultKind::Od), 0);

        let results = cache.snapshot();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].kind(), ResultKind::Fd);
        assert_eq!(results[1].kind(), ResultKind::Ucc);
    }

    #[test]
    fn test_malformed_result_is_rejected() {
        let cache = ResultCache::new();
        let router = ResultRouter::new(Box::new(cache.clone()));

        let err = router.receive_functional_dependency(fd("")).unwrap_err();
        assert!(matches!(
            err,
            CouldNotReceiveResult::Malformed {
                kind: ResultKind::Fd,
                ..
            }
        ));
        assert!(cache.snapshot().is_empty());
        assert!(router.first_failure().is_some());
    }

    #[test]
    fn test_close_is_idempotent_and_blocks_delivery() {
        let cache = ResultCache::new();
        let router = ResultRouter::new(Box::new(cache.clone()));

        router.close().unwrap();
        router.close().unwrap();
        assert!(router.is_closed());
        assert!(cache.is_closed());

        let err = router.receive_functional_dependency(fd("t")).unwrap_err();
        assert!(matches!(err, CouldNotReceiveResult::SinkClosed));
    }

    #[test]
    fn test_first_failure_is_retained() {
        let router = ResultRouter::new(Box::new(ResultCache::new()));

        let _ = router.receive_functional_dependency(fd(""));
        router.close().unwrap();
        let _ = router.receive_functional_dependency(fd("t"));

        let failure = router.first_failure().unwrap();
        assert_eq!(failure.kind, ResultKind::Fd);
        assert!(failure.reason.starts_with("Malformed fd result"));
    }

    #[tokio::test]
    async fn test_result_events() {
        let (tx, mut rx) = progress_channel();
        let router = ResultRouter::new(Box::new(ResultCache::new()));
        router.set_event_sender(tx);

        router.receive_functional_dependency(fd("t")).unwrap();

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            ExecutionEvent::ResultReceived {
                kind: ResultKind::Fd
            }
        ));
    }
}
