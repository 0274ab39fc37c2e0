// Temp File Provisioning
// Hands out scratch files to algorithms and deletes them when the run ends

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempPath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TempFileError {
    #[error("Temp file generator is closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Creates temp files on behalf of an algorithm
pub trait TempFileGenerator: Send + Sync {
    fn create_temp_file(&self) -> Result<PathBuf, TempFileError>;

    /// Delete every file created so far and refuse new ones
    fn close(&self) -> Result<(), TempFileError>;
}

#[derive(Debug, Default)]
struct ProviderState {
    files: Vec<TempPath>,
    counter: usize,
    closed: bool,
}

/// Creates files named `<prefix>_<n>_*` inside a directory
#[derive(Debug)]
pub struct TempFileProvider {
    directory: PathBuf,
    prefix: String,
    state: Mutex<ProviderState>,
}

impl TempFileProvider {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            state: Mutex::new(ProviderState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of files currently alive
    pub fn file_count(&self) -> usize {
        self.lock().files.len()
    }
}

impl TempFileGenerator for TempFileProvider {
    fn create_temp_file(&self) -> Result<PathBuf, TempFileError> {
        let mut state = self.lock();
        if state.closed {
            return Err(TempFileError::Closed);
        }

        std::fs::create_dir_all(&self.directory)?;

        let prefix = format!("{}_{}_", self.prefix, state.counter);
        let path = tempfile::Builder::new()
            .prefix(&prefix)
            .tempfile_in(&self.directory)?
            .into_temp_path();

        state.counter += 1;
        let created = path.to_path_buf();
        state.files.push(path);
        Ok(created)
    }

    fn close(&self) -> Result<(), TempFileError> {
        let files = {
            let mut state = self.lock();
            state.closed = true;
            std::mem::take(&mut state.files)
        };

        let mut first_error = None;
        for file in files {
            if let Err(e) = file.close() {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

impl Drop for TempFileProvider {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_prefixed_files() {
        let temp = TempDir::new().unwrap();
        let provider = TempFileProvider::new(temp.path(), "run1");

        let first = provider.create_temp_file().unwrap();
        let second = provider.create_temp_file().unwrap();

        assert_ne!(first, second);
        assert!(first.exists());
        let name = first.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("run1_0_"));
        assert_eq!(provider.file_count(), 2);
    }

    #[test]
    fn test_close_deletes_files_and_refuses_new_ones() {
        let temp = TempDir::new().unwrap();
        let provider = TempFileProvider::new(temp.path(), "run1");

        let path = provider.create_temp_file().unwrap();
        provider.close().unwrap();

        assert!(!path.exists());
        assert_eq!(provider.file_count(), 0);
        assert!(matches!(
            provider.create_temp_file(),
            Err(TempFileError::Closed)
        ));

        // closing again is harmless
        provider.close().unwrap();
    }
}
