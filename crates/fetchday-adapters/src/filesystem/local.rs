//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use fetchday_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{FetchDayError, FetchDayResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> FetchDayResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> FetchDayResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> FetchDayResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_file(&self, path: &Path) -> FetchDayResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn list_dir(&self, path: &Path) -> FetchDayResult<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "list directory"))?;
            let is_file = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "inspect entry"))?
                .is_file();
            if is_file {
                paths.push(entry.path());
            }
        }
        Ok(paths)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> FetchDayError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
