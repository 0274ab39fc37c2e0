// Result Cache
// In-memory result sink that hosts can poll while a run is in progress

use crate::results::model::{
    BasicStatistic, ConditionalUniqueColumnCombination, FunctionalDependency,
    InclusionDependency, OrderDependency, ProfilingResult, UniqueColumnCombination,
};
use crate::results::router::{CouldNotReceiveResult, ResultSink};

use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct CacheState {
    results: Vec<ProfilingResult>,
    /// Index of the first result not yet handed out by `fetch_new_results`
    fetched: usize,
    closed: bool,
}

/// Shared handle on collected results. Clones see the same results.
#[derive(Debug, Clone, Default)]
pub struct ResultCache {
    state: Arc<Mutex<CacheState>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, result: ProfilingResult) -> Result<(), CouldNotReceiveResult> {
        let mut state = self.lock();
        if state.closed {
            return Err(CouldNotReceiveResult::SinkClosed);
        }
        state.results.push(result);
        Ok(())
    }

    /// Results delivered since the previous fetch
    pub fn fetch_new_results(&self) -> Vec<ProfilingResult> {
        let mut state = self.lock();
        let start = state.fetched;
        state.fetched = state.results.len();
        state.results[start..].to_vec()
    }

    /// All results delivered so far
    pub fn snapshot(&self) -> Vec<ProfilingResult> {
        self.lock().results.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl ResultSink for ResultCache {
    fn receive_functional_dependency(
        &mut self,
        result: FunctionalDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.push(ProfilingResult::FunctionalDependency(result))
    }

    fn receive_inclusion_dependency(
        &mut self,
        result: InclusionDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.push(ProfilingResult::InclusionDependency(result))
    }

    fn receive_unique_column_combination(
        &mut self,
        result: UniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        self.push(ProfilingResult::UniqueColumnCombination(result))
    }

    fn receive_conditional_unique_column_combination(
        &mut self,
        result: ConditionalUniqueColumnCombination,
    ) -> Result<(), CouldNotReceiveResult> {
        self.push(ProfilingResult::ConditionalUniqueColumnCombination(result))
    }

    fn receive_order_dependency(
        &mut self,
        result: OrderDependency,
    ) -> Result<(), CouldNotReceiveResult> {
        self.push(ProfilingResult::OrderDependency(result))
    }

    fn receive_basic_statistic(
        &mut self,
        result: BasicStatistic,
    ) -> Result<(), CouldNotReceiveResult> {
        self.push(ProfilingResult::BasicStatistic(result))
    }

    fn close(&mut self) -> Result<(), CouldNotReceiveResult> {
        self.lock().closed = true;
        Ok(())
    }
}
