use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::entities::common::RelativePath;
use crate::domain::error::DomainError;

/// Rendered stub files ready for materialization under `root`.
///
/// This is the output of template rendering. It contains no business logic,
/// only data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: String) {
        self.files.push(FileToWrite {
            path: path.into(),
            content,
        });
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: String) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::InvalidTemplate(
                "rendered structure is empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            RelativePath::try_new(&file.path)?;

            let path_str = file.path.display().to_string();
            if !seen.insert(path_str.clone()) {
                return Err(DomainError::DuplicatePath { path: path_str });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    /// Look up a rendered file by its relative path.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        let path = path.as_ref();
        self.files.iter().find(|f| f.path == path)
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToWrite {
    pub path: PathBuf,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_structure_is_invalid() {
        assert!(ProjectStructure::new("rs/day_01").validate().is_err());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let structure = ProjectStructure::new("go/day_01")
            .with_file("main.go", "a".into())
            .with_file("main.go", "b".into());
        assert_eq!(
            structure.validate(),
            Err(DomainError::DuplicatePath {
                path: "main.go".into()
            })
        );
    }

    #[test]
    fn lookup_by_path() {
        let structure = ProjectStructure::new("rs/day_01")
            .with_file("src/lib.rs", "pub const PART_1: usize = 0;\n".into())
            .with_file("Cargo.toml", "[package]\n".into());
        assert!(structure.validate().is_ok());
        assert_eq!(structure.file_count(), 2);
        assert!(structure.file("src/lib.rs").is_some());
        assert!(structure.file("src").is_none());
    }

    #[test]
    fn parent_components_are_rejected() {
        let structure =
            ProjectStructure::new("rs/day_01").with_file("../../escape.rs", "x".into());
        assert!(matches!(
            structure.validate(),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }
}
