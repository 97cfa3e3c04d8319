use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to be relative and free of `..`.
///
/// Invariant: never absolute, never escapes its root. Enforced at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if path.is_absolute() || escapes {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        Self::try_new(self.0.join(segment))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Lossy string form, used as a render input for path placeholders.
    pub fn to_string_lossy(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
