// Engine Errors
// Unified error type for loading, configuration, execution and storage failures

use crate::capability::Capability;

use std::fmt;
use std::time::Duration;

/// Boxed error used as the underlying cause of an [`EngineError`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// The stage of a run an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The algorithm could not be instantiated from its descriptor
    Loading,
    /// A configuration value could not be built, resolved or applied
    Configuration,
    /// The algorithm's execute call failed or a result could not be delivered
    Execution,
    /// The completed execution record could not be persisted
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Loading => write!(f, "loading"),
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Execution => write!(f, "execution"),
            ErrorKind::Storage => write!(f, "storage"),
        }
    }
}

/// Error raised by the engine, tagged with the [`ErrorKind`] callers match on
#[derive(Debug)]
pub struct EngineError {
    /// Which part of the run failed
    pub kind: ErrorKind,
    /// Human readable message
    pub message: String,
    /// Identifier of the offending configuration requirement
    pub requirement: Option<String>,
    /// Capability that was missing or involved in the failure
    pub capability: Option<Capability>,
    /// Elapsed execution time, kept when a completed run failed to persist
    pub elapsed: Option<Duration>,
    /// Underlying cause
    pub source: Option<BoxError>,
    /// Failures that happened while cleaning up after this one
    pub secondary: Vec<EngineError>,
}

impl EngineError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            requirement: None,
            capability: None,
            elapsed: None,
            source: None,
            secondary: Vec::new(),
        }
    }

    pub fn loading(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Loading, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Execution, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    pub fn with_requirement(mut self, identifier: impl Into<String>) -> Self {
        self.requirement = Some(identifier.into());
        self
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a later failure without replacing this one
    pub fn with_secondary(mut self, error: EngineError) -> Self {
        self.secondary.push(error);
        self
    }

    /// Check whether this error is of the given kind
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Elapsed time of the run, only present for storage failures after a completed run
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)?;

        if let Some(requirement) = &self.requirement {
            write!(f, " (requirement '{}')", requirement)?;
        }

        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }

        for secondary in &self.secondary {
            write!(f, "; then {}", secondary)?;
        }

        Ok(())
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
