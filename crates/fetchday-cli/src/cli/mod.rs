//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fetchday_core::domain::{FIRST_YEAR, LAST_DAY};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "fetch-day",
    bin_name = "fetch-day",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Fetch a day's puzzle input and instructions, and scaffold solution stubs",
    long_about = "fetch-day downloads your personal puzzle input (storing an encrypted \
                  copy next to it), turns the puzzle page into a README and renders \
                  Go, Rust and TypeScript solution stubs for the day.",
    after_help = "EXAMPLES:\n\
        \x20 fetch-day fetch                       # today, all languages\n\
        \x20 fetch-day fetch -d 7 --year 2022 -l rs\n\
        \x20 fetch-day fetch -d 7 --part-2         # refresh READMEs after part 1\n\
        \x20 fetch-day decrypt\n\
        \x20 fetch-day completions bash > ~/.local/share/bash-completion/completions/fetch-day",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Download input and instructions and create stubs for a day.
    #[command(
        visible_alias = "f",
        about = "Fetch a puzzle and scaffold its stubs",
        after_help = "EXAMPLES:\n\
            \x20 fetch-day fetch -d 1\n\
            \x20 fetch-day fetch -d 1 -l go,ts --keep-instructions\n\
            \x20 fetch-day fetch -d 1 --no-data --skip-templates --download\n\n\
            ENVIRONMENT:\n\
            \x20 AOC_SESSION_TOKEN   session cookie used for downloads\n\
            \x20 AOC_AES_KEY         32-byte key for the encrypted data copy"
    )]
    Fetch(FetchArgs),

    /// Restore plain data files from their encrypted copies.
    #[command(
        about = "Decrypt data/*.enc.txt files",
        after_help = "EXAMPLES:\n\
            \x20 AOC_AES_KEY=... fetch-day decrypt\n\
            \x20 fetch-day decrypt --data-dir ../data"
    )]
    Decrypt(DecryptArgs),

    /// Initialise a fetch-day configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 fetch-day init\n\
            \x20 fetch-day init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 fetch-day completions bash > ~/.local/share/bash-completion/completions/fetch-day\n\
            \x20 fetch-day completions zsh  > ~/.zfunc/_fetch-day\n\
            \x20 fetch-day completions fish > ~/.config/fish/completions/fetch-day.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the fetch-day configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 fetch-day config get paths.data_dir\n\
            \x20 fetch-day config list --output-format json\n\
            \x20 fetch-day config path"
    )]
    Config(ConfigCommands),
}

// ── fetch ─────────────────────────────────────────────────────────────────────

/// Arguments for `fetch-day fetch`.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Puzzle day. Defaults to today in UTC-5, capped at 25.
    #[arg(
        short = 'd',
        long = "day",
        value_name = "DAY",
        value_parser = clap::value_parser!(u32).range(1..=LAST_DAY as i64),
        help = "Puzzle day (1-25)"
    )]
    pub day: Option<u32>,

    /// Puzzle year. Defaults to the current year.
    #[arg(
        long = "year",
        value_name = "YEAR",
        value_parser = clap::value_parser!(u32).range(FIRST_YEAR as i64..),
        help = "Puzzle year"
    )]
    pub year: Option<u32>,

    /// Download the instructions even if a cached copy exists.
    #[arg(
        short = 'f',
        long = "download",
        help = "Download instructions even if cached"
    )]
    pub download: bool,

    /// Do not download the puzzle input.
    #[arg(long = "no-data", help = "Skip downloading the puzzle input")]
    pub no_data: bool,

    /// Languages to create instructions and templates for.
    #[arg(
        short = 'l',
        long = "langs",
        value_name = "LANG",
        value_enum,
        value_delimiter = ',',
        help = "Languages to create instructions and templates for"
    )]
    pub langs: Vec<LangArg>,

    /// Skip code template creation for each language.
    #[arg(long = "skip-templates", help = "Skip code template creation")]
    pub skip_templates: bool,

    /// Keep the downloaded puzzle page after converting it.
    #[arg(
        long = "keep-instructions",
        help = "Keep instructions.html after conversion"
    )]
    pub keep_instructions: bool,

    /// Update the READMEs to contain part 2.
    #[arg(
        long = "part-2",
        help = "Update the READMEs to contain part 2. Alias for '--download --no-data --skip-templates'"
    )]
    pub part_2: bool,

    /// Replace stub files that already exist.
    #[arg(long = "overwrite", help = "Overwrite existing stub files")]
    pub overwrite: bool,
}

// ── decrypt ───────────────────────────────────────────────────────────────────

/// Arguments for `fetch-day decrypt`.
#[derive(Debug, Args)]
pub struct DecryptArgs {
    /// Directory holding the encrypted files. Defaults to `paths.data_dir`.
    #[arg(long = "data-dir", value_name = "DIR", help = "Data directory")]
    pub data_dir: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `fetch-day init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `fetch-day completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

// ── config ────────────────────────────────────────────────────────────────────

/// `fetch-day config` subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one configuration value.
    Get {
        /// Dotted key, e.g. `paths.data_dir`.
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the default configuration file path.
    Path,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Languages stubs can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LangArg {
    /// Also accepted as `golang`.
    #[value(alias = "golang")]
    Go,
    /// Also accepted as `rust`.
    #[value(alias = "rust")]
    Rs,
    /// Also accepted as `typescript`.
    #[value(alias = "typescript")]
    Ts,
}

impl From<LangArg> for fetchday_core::domain::Lang {
    fn from(lang: LangArg) -> Self {
        match lang {
            LangArg::Go => Self::Go,
            LangArg::Rs => Self::Rs,
            LangArg::Ts => Self::Ts,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};
    use fetchday_core::domain::Lang;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn lang_converts_to_domain() {
        assert_eq!(Lang::from(LangArg::Rs), Lang::Rs);
    }

    #[test]
    fn parse_fetch_command() {
        let cli = Cli::parse_from(["fetch-day", "fetch", "-d", "7", "--year", "2022"]);
        let Commands::Fetch(args) = cli.command else {
            panic!("expected Fetch command");
        };
        assert_eq!(args.day, Some(7));
        assert_eq!(args.year, Some(2022));
        assert!(args.langs.is_empty());
    }

    #[test]
    fn langs_are_comma_separated_with_aliases() {
        let cli = Cli::parse_from(["fetch-day", "fetch", "-l", "rust,golang", "-l", "ts"]);
        let Commands::Fetch(args) = cli.command else {
            panic!("expected Fetch command");
        };
        assert_eq!(args.langs, vec![LangArg::Rs, LangArg::Go, LangArg::Ts]);
    }

    #[test]
    fn day_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["fetch-day", "fetch", "-d", "26"]).is_err());
        assert!(Cli::try_parse_from(["fetch-day", "fetch", "-d", "0"]).is_err());
    }

    #[test]
    fn year_before_first_series_is_rejected() {
        assert!(Cli::try_parse_from(["fetch-day", "fetch", "--year", "2014"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["fetch-day", "--quiet", "--verbose", "decrypt"]);
        assert!(result.is_err());
    }
}
