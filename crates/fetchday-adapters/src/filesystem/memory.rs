//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use fetchday_core::{
    application::{ApplicationError, ports::Filesystem},
    error::FetchDayResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same contents, so a test can hand one clone to a
/// service and inspect the other.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        let path = path.into();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path, content.into());
        }
        self
    }

    /// Read a file's content as text (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn not_found(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> FetchDayResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> FetchDayResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> FetchDayResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let bytes = inner.files.get(path).ok_or_else(|| not_found(path))?;
        String::from_utf8(bytes.clone()).map_err(|e| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_file(&self, path: &Path) -> FetchDayResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path).into())
    }

    fn list_dir(&self, path: &Path) -> FetchDayResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if !inner.directories.contains(path) {
            return Err(not_found(path).into());
        }

        Ok(inner
            .files
            .keys()
            .filter(|file| file.parent() == Some(path))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("data/day_01.txt"), b"1").is_err());

        fs.create_dir_all(Path::new("data")).unwrap();
        fs.write_file(Path::new("data/day_01.txt"), b"1").unwrap();
        assert_eq!(fs.read_file(Path::new("data/day_01.txt")).as_deref(), Some("1"));
    }

    #[test]
    fn list_dir_is_not_recursive() {
        let fs = MemoryFilesystem::new()
            .with_file("data/day_01.txt", "1")
            .with_file("data/old/day_01.txt", "0");

        assert_eq!(
            fs.list_dir(Path::new("data")).unwrap(),
            vec![PathBuf::from("data/day_01.txt")]
        );
    }

    #[test]
    fn remove_missing_file_fails() {
        let fs = MemoryFilesystem::new();
        assert!(fs.remove_file(Path::new("instructions.html")).is_err());
    }
}
