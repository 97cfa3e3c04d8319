// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Puzzle identity
    // ========================================================================
    #[error("day {day} is out of range (expected 1..=25)")]
    InvalidDay { day: u32 },

    #[error("year {year} is out of range (the series started in 2015)")]
    InvalidYear { year: u32 },

    #[error("unknown language: {0}")]
    UnknownLang(String),

    // ========================================================================
    // Templates
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template for '{lang}' has no files")]
    EmptyTemplate { lang: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Path must stay inside the output directory: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("unresolved placeholder '{{{{{name}}}}}'")]
    UnresolvedPlaceholder { name: String },

    // ========================================================================
    // Instructions
    // ========================================================================
    #[error("no <article> sections found in the instructions page")]
    NoInstructionArticles,

    #[error("unknown tag in instructions: '{tag}'")]
    UnknownInstructionTag { tag: String },

    #[error("anchor without href in instructions: <{anchor}>")]
    MissingLinkTarget { anchor: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDay { .. } => vec![
                "Puzzles are published for days 1 through 25".into(),
                "Example: fetch-day fetch --day 7".into(),
            ],
            Self::InvalidYear { .. } => vec![
                "The first puzzle series was published in 2015".into(),
                "Example: fetch-day fetch --year 2022 --day 1".into(),
            ],
            Self::UnknownLang(lang) => vec![
                format!("'{lang}' is not a supported language"),
                "Supported languages: go, rs, ts".into(),
            ],
            Self::UnresolvedPlaceholder { name } => vec![
                format!("A template references '{name}', which is not a known variable"),
                "Known variables: PACKAGE_NAME, CRATE_NAME, DISPLAY_NAME, DAY, YEAR, PUZZLE_URL"
                    .into(),
            ],
            Self::NoInstructionArticles => vec![
                "The downloaded page did not contain the puzzle text".into(),
                "Check that your session token is valid and the puzzle is unlocked".into(),
                "Re-run with --download to refresh a stale instructions.html".into(),
            ],
            Self::UnknownInstructionTag { tag } => vec![
                format!("The instructions converter does not handle <{tag}>"),
                "Re-run with --keep-instructions and inspect instructions.html".into(),
            ],
            Self::EmptyTemplate { lang } => vec![
                format!("Template set for '{lang}' is empty"),
                "Check the configured templates directory".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDay { .. } | Self::InvalidYear { .. } | Self::UnknownLang(_) => {
                ErrorCategory::Validation
            }
            Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::UnresolvedPlaceholder { .. } => ErrorCategory::Configuration,
            Self::NoInstructionArticles
            | Self::UnknownInstructionTag { .. }
            | Self::MissingLinkTarget { .. } => ErrorCategory::Remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_message_shows_braces() {
        let err = DomainError::UnresolvedPlaceholder {
            name: "CRATE".into(),
        };
        assert_eq!(err.to_string(), "unresolved placeholder '{{CRATE}}'");
    }

    #[test]
    fn every_variant_has_suggestions() {
        let errors = [
            DomainError::InvalidDay { day: 0 },
            DomainError::InvalidYear { year: 1999 },
            DomainError::UnknownLang("java".into()),
            DomainError::NoInstructionArticles,
            DomainError::MissingLinkTarget { anchor: "a".into() },
        ];
        for err in errors {
            assert!(!err.suggestions().is_empty(), "{err}");
        }
    }
}
