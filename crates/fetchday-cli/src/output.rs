//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Auto → Human (TTY) or Plain (piped/redirected)
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Pretty-printed JSON document. Printed even in quiet mode, since it was
    /// asked for explicitly.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`. Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}")
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Spinner on stderr while waiting on the network.
    ///
    /// `None` when quiet, when emitting JSON, or when stderr is not a
    /// terminal.
    pub fn spinner(&self, msg: impl Into<String>) -> Option<ProgressBar> {
        if self.quiet || self.is_json() || !io::stderr().is_terminal() {
            return None;
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(msg.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Some(bar)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
            log_file: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn error_not_suppressed_in_quiet_mode() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.error("something went wrong").is_ok());
    }

    #[test]
    fn no_color_flag_reported() {
        let colored = make_manager(false, false, OutputFormat::Human);
        let no_color = make_manager(false, true, OutputFormat::Human);
        assert!(colored.supports_color());
        assert!(!no_color.supports_color());
    }

    #[test]
    fn plain_format_disables_color() {
        assert!(!make_manager(false, false, OutputFormat::Plain).supports_color());
    }

    #[test]
    fn config_can_disable_color() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
            log_file: None,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn format_accessor_returns_resolved() {
        let out = make_manager(false, false, OutputFormat::Plain);
        assert_eq!(out.format(), OutputFormat::Plain);
        assert!(!out.is_json());
    }

    #[test]
    fn json_format_has_no_spinner() {
        let out = make_manager(false, true, OutputFormat::Json);
        assert!(out.is_json());
        assert!(out.spinner("Downloading").is_none());
    }
}
