//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod decrypt;
pub mod fetch;
pub mod init;

use crate::error::{CliError, CliResult};

/// Name of the session cookie variable.
pub const SESSION_TOKEN_VAR: &str = "AOC_SESSION_TOKEN";

/// Name of the data encryption key variable.
pub const AES_KEY_VAR: &str = "AOC_AES_KEY";

/// Read a non-empty environment variable.
///
/// The value is returned as set. Surrounding whitespace may be part of a
/// key, so it is not stripped.
pub(crate) fn env_var(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Read a variable that the current command cannot do without.
pub(crate) fn require_env(name: &'static str, purpose: &'static str) -> CliResult<String> {
    env_var(name).ok_or(CliError::MissingCredential { name, purpose })
}
