// Execution Orchestrator
// Loads, configures, instruments, runs, times and records one algorithm execution

use crate::algorithm::Algorithm;
use crate::capability::{Capability, CapabilityAnalyzer, CapabilityHandle, CapabilitySet};
use crate::config::EngineConfig;
use crate::configuration::{ConfigurationBinder, ConfigurationRequirement};
use crate::error::{EngineError, EngineResult, ErrorKind};
use crate::execution::events::{EventSender, ExecutionEvent, ProgressSender};
use crate::loader::AlgorithmLoader;
use crate::progress::ProgressTracker;
use crate::resources::{Input, ResourceResolver};
use crate::results::printer::ResultPrinter;
use crate::results::router::{CouldNotReceiveResult, ResultRouter, ResultSink};
use crate::storage::models::{AlgorithmDescriptor, Execution, ResultRecord};
use crate::storage::ExecutionStore;
use crate::temp_files::{TempFileGenerator, TempFileProvider};

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// An algorithm that is configured and wired, ready to execute
struct PreparedRun {
    algorithm: Box<dyn Algorithm>,
    inputs: Vec<Input>,
    results: Vec<ResultRecord>,
}

/// Runs a single algorithm execution end to end.
///
/// The result sink and temp files are released when `run` returns, so an
/// orchestrator serves one run. Concurrent runs use separate orchestrators
/// with distinct result path prefixes.
pub struct ExecutionOrchestrator {
    loader: Arc<dyn AlgorithmLoader>,
    resolver: Arc<dyn ResourceResolver>,
    store: Arc<dyn ExecutionStore>,
    router: Arc<ResultRouter>,
    progress: Arc<ProgressTracker>,
    temp_files: Arc<dyn TempFileGenerator>,
    result_path_prefix: String,
    event_tx: Option<ProgressSender>,
}

impl ExecutionOrchestrator {
    pub fn new(
        loader: Arc<dyn AlgorithmLoader>,
        resolver: Arc<dyn ResourceResolver>,
        store: Arc<dyn ExecutionStore>,
        sink: Box<dyn ResultSink>,
        temp_files: Arc<dyn TempFileGenerator>,
    ) -> Self {
        Self {
            loader,
            resolver,
            store,
            router: Arc::new(ResultRouter::new(sink)),
            progress: Arc::new(ProgressTracker::new()),
            temp_files,
            result_path_prefix: "run".to_string(),
            event_tx: None,
        }
    }

    /// Create an orchestrator writing results and temp files under the configured
    /// directories, named after the configured result path prefix
    pub fn from_config(
        config: &EngineConfig,
        loader: Arc<dyn AlgorithmLoader>,
        resolver: Arc<dyn ResourceResolver>,
        store: Arc<dyn ExecutionStore>,
    ) -> Self {
        let prefix = &config.result_path_prefix;
        let sink = ResultPrinter::new(&config.results_dir, prefix.as_str());
        let temp_files = TempFileProvider::new(&config.temp_dir, prefix.as_str());

        Self::new(loader, resolver, store, Box::new(sink), Arc::new(temp_files))
            .with_result_path_prefix(prefix.as_str())
    }

    pub fn with_result_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.result_path_prefix = prefix.into();
        self
    }

    /// Set progress event sender
    pub fn with_progress(mut self, tx: ProgressSender) -> Self {
        self.router.set_event_sender(tx.clone());
        self.progress.attach_events(tx.clone());
        self.event_tx = Some(tx);
        self
    }

    pub fn result_path_prefix(&self) -> &str {
        &self.result_path_prefix
    }

    /// Progress tracker handed to progress-reporting algorithms
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn router(&self) -> &ResultRouter {
        &self.router
    }

    /// Execute an algorithm and persist the execution.
    ///
    /// Returns the elapsed execute time. Loading and configuration failures
    /// happen before execute is called; nothing is persisted unless execute
    /// and every result delivery succeeded.
    pub async fn run(
        &self,
        descriptor: &AlgorithmDescriptor,
        requirements: &[ConfigurationRequirement],
    ) -> EngineResult<Duration> {
        self.event_tx.send_event(ExecutionEvent::run_started(
            &descriptor.name,
            &self.result_path_prefix,
        ));

        let executed = match self.prepare(descriptor, requirements) {
            Ok(prepared) => self.execute(descriptor, prepared).await,
            Err(e) => Err(e),
        };

        let released = self.release_resources();
        if let Err(e) = &released {
            self.event_tx.send_event(ExecutionEvent::error(e.to_string()));
        } else {
            self.event_tx
                .send_event(ExecutionEvent::debug("released result sink and temp files"));
        }

        let outcome = match (executed, released) {
            (Ok(done), Ok(())) => Ok(done),
            (Err(e), Ok(())) | (Ok(_), Err(e)) => Err(e),
            (Err(e), Err(release)) => Err(e.with_secondary(release)),
        };

        let (execution, elapsed) = match outcome {
            Ok(done) => done,
            Err(e) => {
                self.event_tx.send_event(ExecutionEvent::run_failed(
                    &descriptor.name,
                    e.kind,
                    e.to_string(),
                ));
                return Err(e);
            }
        };

        if let Err(e) = self.store.store(&execution).await {
            let e = match e.kind {
                ErrorKind::Storage => e,
                _ => EngineError::storage("could not store execution").with_source(e),
            };
            let e = e.with_elapsed(elapsed);

            self.event_tx.send_event(ExecutionEvent::run_failed(
                &descriptor.name,
                e.kind,
                e.to_string(),
            ));
            return Err(e);
        }

        self.event_tx.send_event(ExecutionEvent::ExecutionStored {
            execution_id: execution.id,
        });

        Ok(elapsed)
    }

    /// Load the algorithm, bind its configuration and attach instrumentation
    fn prepare(
        &self,
        descriptor: &AlgorithmDescriptor,
        requirements: &[ConfigurationRequirement],
    ) -> EngineResult<PreparedRun> {
        let mut algorithm = self.loader.load(descriptor)?;
        let capabilities = CapabilityAnalyzer::capabilities_of(algorithm.as_mut());

        self.event_tx.send_event(ExecutionEvent::capabilities_resolved(
            &descriptor.name,
            capabilities.iter(),
        ));

        let mut binder = ConfigurationBinder::new(self.resolver.as_ref());
        let values = binder.bind_all(requirements, algorithm.as_mut(), &capabilities)?;
        for value in &values {
            self.event_tx.send_event(ExecutionEvent::configuration_applied(
                value.identifier(),
                value.kind_name(),
            ));
        }

        let results = self.wire_instrumentation(algorithm.as_mut(), &capabilities);

        Ok(PreparedRun {
            algorithm,
            inputs: binder.into_inputs(),
            results,
        })
    }

    /// Attach the router, temp files and progress tracker according to the capabilities.
    /// Returns one result record per result-producing capability.
    fn wire_instrumentation(
        &self,
        algorithm: &mut dyn Algorithm,
        capabilities: &CapabilitySet,
    ) -> Vec<ResultRecord> {
        let mut results = Vec::new();

        for capability in capabilities.iter() {
            let Some(handle) = CapabilityAnalyzer::implements(&mut *algorithm, capability) else {
                continue;
            };

            match handle {
                CapabilityHandle::FunctionalDependency(target) => {
                    target.set_result_receiver(self.router.clone())
                }
                CapabilityHandle::InclusionDependency(target) => {
                    target.set_result_receiver(self.router.clone())
                }
                CapabilityHandle::UniqueColumnCombination(target) => {
                    target.set_result_receiver(self.router.clone())
                }
                CapabilityHandle::ConditionalUniqueColumnCombination(target) => {
                    target.set_result_receiver(self.router.clone())
                }
                CapabilityHandle::OrderDependency(target) => {
                    target.set_result_receiver(self.router.clone())
                }
                CapabilityHandle::BasicStatistics(target) => {
                    target.set_result_receiver(self.router.clone())
                }
                CapabilityHandle::TempFiles(target) => {
                    target.set_temp_file_generator(self.temp_files.clone())
                }
                CapabilityHandle::ProgressEstimation(target) => {
                    target.set_progress_receiver(self.progress.clone())
                }
                // bound by the configuration binder
                CapabilityHandle::StringConfiguration(_)
                | CapabilityHandle::BooleanConfiguration(_)
                | CapabilityHandle::IntegerConfiguration(_)
                | CapabilityHandle::ListBoxConfiguration(_)
                | CapabilityHandle::CheckBoxConfiguration(_)
                | CapabilityHandle::FileInputConfiguration(_)
                | CapabilityHandle::TableInputConfiguration(_)
                | CapabilityHandle::DatabaseConnectionConfiguration(_) => {}
            }

            if let Some(kind) = capability.result_kind() {
                results.push(ResultRecord::new(&self.result_path_prefix, kind));
            }
        }

        results
    }

    /// Run execute on the blocking pool, timing it, and assemble the execution record
    async fn execute(
        &self,
        descriptor: &AlgorithmDescriptor,
        prepared: PreparedRun,
    ) -> EngineResult<(Execution, Duration)> {
        let PreparedRun {
            mut algorithm,
            inputs,
            results,
        } = prepared;

        let begin = epoch_millis();

        let (outcome, elapsed) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let outcome = algorithm.execute();
            (outcome, start.elapsed())
        })
        .await
        .map_err(|e| {
            let message = if e.is_panic() {
                "algorithm panicked during execute"
            } else {
                "algorithm task was cancelled"
            };
            EngineError::execution(message)
        })?;

        outcome.map_err(|e| EngineError::execution("algorithm execution failed").with_source(e))?;

        if let Some(failure) = self.router.first_failure() {
            return Err(EngineError::execution("result delivery failed")
                .with_capability(Capability::producing(failure.kind))
                .with_source(failure));
        }

        self.event_tx
            .send_event(ExecutionEvent::run_completed(&descriptor.name, elapsed));

        let end = begin + elapsed.as_millis() as i64;
        let execution = Execution::new(descriptor.clone(), begin, &self.result_path_prefix)
            .with_end(end)
            .with_inputs(inputs)
            .with_results(results);

        Ok((execution, elapsed))
    }

    /// Close the result sink and delete temp files. Both are attempted.
    fn release_resources(&self) -> EngineResult<()> {
        let closed = self.router.close();
        let cleaned = self.temp_files.close();

        closed.map_err(|e| EngineError::execution("could not close result sink").with_source(e))?;
        cleaned.map_err(|e| EngineError::execution("could not remove temp files").with_source(e))
    }

    /// Close the result sink. Later calls are no-ops.
    pub fn close(&self) -> Result<(), CouldNotReceiveResult> {
        self.router.close()
    }
}

impl Drop for ExecutionOrchestrator {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
