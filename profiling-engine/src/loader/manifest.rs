// Algorithm Manifest Parser
// Parses the JSON manifests that describe registered algorithms

use crate::storage::models::AlgorithmDescriptor;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing algorithm manifests
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read algorithm manifest: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse algorithm manifest: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Algorithm manifest not found at: {0}")]
    NotFound(String),

    #[error("Invalid algorithm manifest: {0}")]
    Invalid(String),
}

/// Algorithm manifest (`<name>.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmManifest {
    /// File name the algorithm is addressed by
    pub file_name: String,

    /// Display name
    pub name: String,

    /// Id of the registered factory that builds the algorithm
    pub factory: String,

    pub author: Option<String>,

    pub description: Option<String>,
}

impl FromStr for AlgorithmManifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let manifest: AlgorithmManifest = serde_json::from_str(s)?;
        manifest.validate()?;
        Ok(manifest)
    }
}

impl AlgorithmManifest {
    /// Parse an algorithm manifest from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ManifestError::NotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse_str(&content)
    }

    /// Parse an algorithm manifest from JSON string
    pub fn parse_str(content: &str) -> Result<Self, ManifestError> {
        content.parse()
    }

    fn validate(&self) -> Result<(), ManifestError> {
        if self.file_name.trim().is_empty() {
            return Err(ManifestError::Invalid("fileName must not be empty".to_string()));
        }
        if self.factory.trim().is_empty() {
            return Err(ManifestError::Invalid(format!(
                "factory must not be empty for {}",
                self.file_name
            )));
        }
        Ok(())
    }

    /// The descriptor executions of this algorithm are recorded under
    pub fn descriptor(&self) -> AlgorithmDescriptor {
        AlgorithmDescriptor {
            id: None,
            file_name: self.file_name.clone(),
            name: self.name.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
        }
    }
}
