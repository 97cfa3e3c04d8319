//! Unified error handling for Fetchday Core.
//!
//! Wraps domain and application errors behind one type, with
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Fetchday Core operations.
#[derive(Debug, Error, Clone)]
pub enum FetchDayError {
    /// Errors from the domain layer (invalid values, malformed instructions).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, remote, crypto).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl FetchDayError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in fetch-day".into(),
                "Please report this issue at: https://github.com/cosecruz/fetchday/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether running the same command again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::StoreLockError | ApplicationError::FetchFailed { .. }
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Remote,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type FetchDayResult<T> = Result<T, FetchDayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_category_is_forwarded() {
        let err: FetchDayError = DomainError::InvalidDay { day: 30 }.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn fetch_failures_are_retryable() {
        let err: FetchDayError = ApplicationError::FetchFailed {
            url: "https://example.com".into(),
            reason: "timeout".into(),
        }
        .into();
        assert!(err.is_retryable());
        assert_eq!(err.category(), ErrorCategory::Remote);
    }
}
