//! # fetch-day
//!
//! Downloads a day's puzzle input and instructions and scaffolds solution
//! stubs for it.
//!
//! ## Startup sequence
//!
//! 1. Load `.env`, then parse CLI arguments (clap handles `--help` /
//!    `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults + file + env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Resource not found      |
//! |  4   | Configuration error     |
//! |  5   | Remote service error    |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here and must exit 0
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    // `init` creates the file `--config` points at, so it must not require it
    let loaded = match cli.command {
        Commands::Init(_) | Commands::Completions(_) => Ok(AppConfig::default()),
        _ => AppConfig::load(cli.global.config.as_ref()),
    };
    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, cli.global.verbose > 0);
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);
    let verbose = cli.global.verbose > 0;

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("fetch-day completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Fetch(cmd) => commands::fetch::execute(cmd, config, output),
        Commands::Decrypt(cmd) => commands::decrypt::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Translate a `CliError` into a user message and an exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr so the message survives a redirected stdout
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }
}
