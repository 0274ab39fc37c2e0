// Loader Module
// Algorithm manifests, the factory registry, and the loader seam

pub mod manifest;
pub mod registry;

use crate::algorithm::Algorithm;
use crate::error::EngineResult;
use crate::storage::models::AlgorithmDescriptor;

// Re-export key types
pub use manifest::{AlgorithmManifest, ManifestError};
pub use registry::{AlgorithmFactory, AlgorithmRegistry};

/// Instantiates algorithms from their stored descriptors
pub trait AlgorithmLoader: Send + Sync {
    /// Build a fresh instance. Failures are loading errors.
    fn load(&self, descriptor: &AlgorithmDescriptor) -> EngineResult<Box<dyn Algorithm>>;
}
