//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not domain
//! rules. Domain rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The remote request could not be completed.
    #[error("Failed to fetch {url}: {reason}")]
    FetchFailed { url: String, reason: String },

    /// The remote site has not published this puzzle (yet).
    #[error("Puzzle {puzzle} is not available")]
    PuzzleNotAvailable { puzzle: String },

    /// The session token was refused.
    #[error("Session token rejected (HTTP {status})")]
    SessionRejected { status: u16 },

    /// The data key is unusable.
    #[error("Invalid data key: {reason}")]
    InvalidKey { reason: String },

    /// Encrypting downloaded input failed.
    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    /// Decrypting a stored data file failed.
    #[error("Failed to decrypt {path}: {reason}")]
    DecryptionFailed { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed for '{lang}': {reason}")]
    RenderingFailed { lang: String, reason: String },

    /// No template registered for a language.
    #[error("No template registered for '{lang}'")]
    TemplateNotFound { lang: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Run fetch-day from the root of your solutions repository".into(),
            ],
            Self::FetchFailed { .. } => vec![
                "Check your network connection".into(),
                "Try again in a moment".into(),
            ],
            Self::PuzzleNotAvailable { puzzle } => vec![
                format!("{puzzle} has not been published yet"),
                "Puzzles unlock at midnight UTC-5".into(),
                "Pass --day and --year to pick an earlier puzzle".into(),
            ],
            Self::SessionRejected { .. } => vec![
                "Your session token is missing, expired or wrong".into(),
                "Copy the 'session' cookie from your browser into AOC_SESSION_TOKEN".into(),
            ],
            Self::InvalidKey { .. } => vec![
                "AOC_AES_KEY must be exactly 32 bytes".into(),
                "Use the same key on every machine that decrypts the data".into(),
            ],
            Self::DecryptionFailed { path, .. } => vec![
                format!("Could not decrypt {}", path.display()),
                "Check that AOC_AES_KEY matches the key used to encrypt it".into(),
            ],
            Self::TemplateNotFound { lang } => vec![
                format!("No stub template is available for '{lang}'"),
                "Supported languages: go, rs, ts".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {name}"),
                "This is likely a configuration error".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. }
            | Self::EncryptionFailed { .. }
            | Self::RenderingFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
            Self::FetchFailed { .. } | Self::SessionRejected { .. } => ErrorCategory::Remote,
            Self::PuzzleNotAvailable { .. } | Self::TemplateNotFound { .. } => {
                ErrorCategory::NotFound
            }
            Self::InvalidKey { .. } | Self::AdapterNotConfigured { .. } => {
                ErrorCategory::Configuration
            }
            Self::DecryptionFailed { .. } => ErrorCategory::Validation,
        }
    }
}
