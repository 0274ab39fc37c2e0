// Profiling Engine Library
// Loads, configures, instruments and runs data-profiling algorithms and records their executions

pub mod algorithm;
pub mod capability;
pub mod config;
pub mod configuration;
pub mod error;
pub mod execution;
pub mod loader;
pub mod progress;
pub mod resources;
pub mod results;
pub mod storage;
pub mod temp_files;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use error::{BoxError, EngineError, EngineResult, ErrorKind};

// Re-export algorithm contracts
pub use algorithm::{
    Algorithm, AlgorithmConfigurationError, AlgorithmExecutionError, BasicStatisticsAlgorithm,
    BooleanParameterAlgorithm, CheckBoxParameterAlgorithm,
    ConditionalUniqueColumnCombinationAlgorithm,
    DatabaseConnectionParameterAlgorithm, FileInputParameterAlgorithm,
    FunctionalDependencyAlgorithm, InclusionDependencyAlgorithm, IntegerParameterAlgorithm,
    ListBoxParameterAlgorithm, OrderDependencyAlgorithm, ProgressEstimatingAlgorithm,
    StringParameterAlgorithm, TableInputParameterAlgorithm, TempFileAlgorithm,
    UniqueColumnCombinationAlgorithm,
};
pub use capability::{Capability, CapabilityAnalyzer, CapabilityHandle, CapabilitySet};

// Re-export configuration types
pub use config::{ConfigError, EngineConfig};
pub use configuration::{
    ConfigurationBinder, ConfigurationRequirement, ConfigurationSetting, ConfigurationValue,
    DatabaseConnectionSetting, FileInputSetting, RequirementShape, TableInputSetting,
};

// Re-export execution types
pub use execution::{
    progress_channel, EventReceiver, EventSender, ExecutionEvent, ExecutionOrchestrator, LogLevel,
    ProgressSender,
};

// Re-export loader types
pub use loader::{AlgorithmLoader, AlgorithmManifest, AlgorithmRegistry, ManifestError};

pub use progress::{ProgressReceiver, ProgressTracker};
pub use resources::{
    InMemoryResourceResolver, Input, InputKind, ResourceReference, ResourceResolver,
};

// Re-export result types
pub use results::{
    CouldNotReceiveResult, DeliveryFailure, ProfilingResult, ResultCache, ResultKind,
    ResultPrinter, ResultRouter, ResultSink,
};

// Re-export storage types
pub use storage::{
    AlgorithmDescriptor, Execution, ExecutionStore, JsonExecutionStore, MemoryExecutionStore,
    ResultRecord,
};
pub use temp_files::{TempFileError, TempFileGenerator, TempFileProvider};
