// Engine Configuration
// Directories and defaults for algorithm runs, loaded from YAML

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read engine config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse engine config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Engine config not found at: {0}")]
    NotFound(String),
}

/// Configuration for the execution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Directory scanned for algorithm manifests (default: ~/.profiling-engine/algorithms/)
    pub algorithms_dir: PathBuf,

    /// Directory result artifacts are written to
    pub results_dir: PathBuf,

    /// Directory for algorithm temp files
    pub temp_dir: PathBuf,

    /// Directory stored executions are written to
    pub executions_dir: PathBuf,

    /// Result path prefix used when a run does not name one
    pub result_path_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let root = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".profiling-engine");

        Self::with_root(root)
    }
}

impl FromStr for EngineConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: EngineConfig = serde_yaml::from_str(s)?;
        Ok(config)
    }
}

impl EngineConfig {
    /// All directories placed under one root
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            algorithms_dir: root.join("algorithms"),
            results_dir: root.join("results"),
            temp_dir: root.join("temp"),
            executions_dir: root.join("executions"),
            result_path_prefix: "run".to_string(),
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        content.parse()
    }

    pub fn with_algorithms_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.algorithms_dir = dir.into();
        self
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn with_executions_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.executions_dir = dir.into();
        self
    }

    pub fn with_result_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.result_path_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.algorithms_dir.ends_with(".profiling-engine/algorithms"));
        assert_eq!(config.result_path_prefix, "run");
    }

    #[test]
    fn test_parse_partial_yaml() {
        let yaml = r#"
resultsDir: /srv/results
resultPathPrefix: nightly
"#;
        let config: EngineConfig = yaml.parse().unwrap();
        assert_eq!(config.results_dir, PathBuf::from("/srv/results"));
        assert_eq!(config.result_path_prefix, "nightly");
        assert_eq!(config.temp_dir, EngineConfig::default().temp_dir);
    }

    #[test]
    fn test_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("engine.yaml");
        fs::write(&path, "tempDir: /tmp/profiling\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.temp_dir, PathBuf::from("/tmp/profiling"));

        let missing = EngineConfig::from_file(temp.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::with_root("/data")
            .with_results_dir("/out")
            .with_result_path_prefix("job42");

        assert_eq!(config.algorithms_dir, PathBuf::from("/data/algorithms"));
        assert_eq!(config.results_dir, PathBuf::from("/out"));
        assert_eq!(config.result_path_prefix, "job42");
    }
}
