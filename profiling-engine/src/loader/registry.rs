// Algorithm Registry
// Factory functions keyed by id, and the descriptors that select them

use crate::algorithm::Algorithm;
use crate::error::{BoxError, EngineError, EngineResult};
use crate::loader::manifest::{AlgorithmManifest, ManifestError};
use crate::loader::AlgorithmLoader;
use crate::storage::models::AlgorithmDescriptor;

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Builds a fresh algorithm instance
pub type AlgorithmFactory = Arc<dyn Fn() -> Result<Box<dyn Algorithm>, BoxError> + Send + Sync>;

/// Registered algorithms
#[derive(Default)]
pub struct AlgorithmRegistry {
    factories: HashMap<String, AlgorithmFactory>,
    /// Descriptor file name to (descriptor, factory id)
    descriptors: BTreeMap<String, (AlgorithmDescriptor, String)>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under an id. Replaces an earlier factory with the same id.
    pub fn register_factory<F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn Algorithm>, BoxError> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Arc::new(factory));
        self
    }

    /// Register a factory that builds `A::default()`
    pub fn register_default<A>(&mut self, id: impl Into<String>) -> &mut Self
    where
        A: Algorithm + Default + 'static,
    {
        self.register_factory(id, || Ok(Box::new(A::default()) as Box<dyn Algorithm>))
    }

    /// Make a descriptor loadable through the given factory id
    pub fn register(
        &mut self,
        descriptor: AlgorithmDescriptor,
        factory: impl Into<String>,
    ) -> &mut Self {
        self.descriptors
            .insert(descriptor.file_name.clone(), (descriptor, factory.into()));
        self
    }

    pub fn register_manifest(&mut self, manifest: &AlgorithmManifest) -> &mut Self {
        self.register(manifest.descriptor(), manifest.factory.clone())
    }

    /// Register every `*.json` manifest in a directory, returning how many were found
    pub fn scan_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, ManifestError> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(0);
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file()
                && path.extension().is_some_and(|ext| ext == "json")
            {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            let manifest = AlgorithmManifest::from_file(path)?;
            self.register_manifest(&manifest);
        }

        Ok(paths.len())
    }

    /// Registered descriptors, ordered by file name
    pub fn descriptors(&self) -> Vec<AlgorithmDescriptor> {
        self.descriptors
            .values()
            .map(|(descriptor, _)| descriptor.clone())
            .collect()
    }

    pub fn find(&self, file_name: &str) -> Option<&AlgorithmDescriptor> {
        self.descriptors.get(file_name).map(|(descriptor, _)| descriptor)
    }
}

impl AlgorithmLoader for AlgorithmRegistry {
    fn load(&self, descriptor: &AlgorithmDescriptor) -> EngineResult<Box<dyn Algorithm>> {
        let (_, factory_id) = self.descriptors.get(&descriptor.file_name).ok_or_else(|| {
            EngineError::loading(format!("unknown algorithm '{}'", descriptor.file_name))
        })?;

        let factory = self.factories.get(factory_id).ok_or_else(|| {
            EngineError::loading(format!(
                "no factory '{}' registered for algorithm '{}'",
                factory_id, descriptor.file_name
            ))
        })?;

        factory().map_err(|e| {
            EngineError::loading(format!(
                "could not instantiate algorithm '{}'",
                descriptor.file_name
            ))
            .with_source(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, CapabilityAnalyzer};
    use crate::error::ErrorKind;
    use crate::fixtures::{DependencyDiscovery, PlainAlgorithm};
    use tempfile::TempDir;

    #[test]
    fn test_load_registered_algorithm() {
        let mut registry = AlgorithmRegistry::new();
        registry
            .register_default::<DependencyDiscovery>("discovery")
            .register(AlgorithmDescriptor::new("discovery.jar", "Discovery"), "discovery");

        let descriptor = registry.find("discovery.jar").unwrap().clone();
        let mut algorithm = registry.load(&descriptor).unwrap();
        let capabilities = CapabilityAnalyzer::capabilities_of(algorithm.as_mut());
        assert!(capabilities.has(Capability::FunctionalDependency));
    }

    #[test]
    fn test_unknown_descriptor() {
        let registry = AlgorithmRegistry::new();
        let err = registry
            .load(&AlgorithmDescriptor::new("missing.jar", "Missing"))
            .err()
            .unwrap();
        assert!(err.is(ErrorKind::Loading));
        assert!(err.message.contains("missing.jar"));
    }

    #[test]
    fn test_missing_factory() {
        let mut registry = AlgorithmRegistry::new();
        registry.register(AlgorithmDescriptor::new("a.jar", "A"), "nowhere");

        let err = registry
            .load(&AlgorithmDescriptor::new("a.jar", "A"))
            .err()
            .unwrap();
        assert!(err.message.contains("no factory 'nowhere'"));
    }

    #[test]
    fn test_factory_fault() {
        let mut registry = AlgorithmRegistry::new();
        registry
            .register_factory("broken", || Err("native library missing".into()))
            .register(AlgorithmDescriptor::new("b.jar", "B"), "broken");

        let err = registry
            .load(&AlgorithmDescriptor::new("b.jar", "B"))
            .err()
            .unwrap();
        assert!(err.is(ErrorKind::Loading));
        assert!(err.to_string().contains("native library missing"));
    }

    #[test]
    fn test_scan_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("plain.json"),
            r#"{ "fileName": "plain.jar", "name": "Plain", "factory": "plain" }"#,
        )
        .unwrap();
        fs::write(
            temp.path().join("discovery.json"),
            r#"{ "fileName": "discovery.jar", "name": "Discovery", "factory": "discovery" }"#,
        )
        .unwrap();
        fs::write(temp.path().join("README.txt"), "ignored").unwrap();

        let mut registry = AlgorithmRegistry::new();
        registry.register_default::<PlainAlgorithm>("plain");

        assert_eq!(registry.scan_dir(temp.path()).unwrap(), 2);

        let names: Vec<_> = registry
            .descriptors()
            .into_iter()
            .map(|d| d.file_name)
            .collect();
        assert_eq!(names, vec!["discovery.jar", "plain.jar"]);

        assert!(registry.load(&AlgorithmDescriptor::new("plain.jar", "Plain")).is_ok());
        // manifest registered, factory not
        assert!(registry
            .load(&AlgorithmDescriptor::new("discovery.jar", "Discovery"))
            .is_err());
    }

    #[test]
    fn test_scan_missing_dir() {
        let mut registry = AlgorithmRegistry::new();
        assert_eq!(registry.scan_dir("/nonexistent/algorithms").unwrap(), 0);
    }
}
