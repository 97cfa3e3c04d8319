//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FETCH_DAY_<SECTION>__<KEY>`, e.g.
//!    `FETCH_DAY_PATHS__DATA_DIR=../data` or `FETCH_DAY_DEFAULTS__LANGS=go,rs`
//! 3. Config file: `--config FILE`, else [`AppConfig::config_path`] if present
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use fetchday_adapters::puzzle_source::DEFAULT_BASE_URL;
use fetchday_core::application::WorkspacePaths;
use fetchday_core::domain::Lang;

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "FETCH_DAY";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Values used when a flag is not given.
    pub defaults: Defaults,
    /// Workspace layout.
    pub paths: PathsConfig,
    /// Remote puzzle site.
    pub remote: RemoteConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Languages used when `--langs` is not given.
    pub langs: Vec<Lang>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root for stub directories; the other paths are relative to it.
    pub output_root: PathBuf,
    pub data_dir: PathBuf,
    pub instructions_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory with `<lang>/…` template overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            langs: Lang::ALL.to_vec(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
            instructions_file: PathBuf::from("instructions.html"),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then the
    /// environment.
    ///
    /// `config_file` is the path passed via `--config`. An explicit file
    /// must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("serialising built-in defaults")?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.langs"),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.fetch-day.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "fetchday", "fetch-day")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".fetch-day.toml"))
    }

    /// Resolve the workspace layout against `paths.output_root`.
    pub fn workspace(&self) -> WorkspacePaths {
        let root = &self.paths.output_root;
        WorkspacePaths::new(root)
            .with_data_dir(root.join(&self.paths.data_dir))
            .with_instructions_file(root.join(&self.paths.instructions_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_langs_are_all_languages() {
        assert_eq!(AppConfig::default().defaults.langs, Lang::ALL.to_vec());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn default_workspace_layout() {
        let paths = AppConfig::default().workspace();
        assert_eq!(paths.root, PathBuf::from("."));
        assert_eq!(paths.data_dir, PathBuf::from("./data"));
        assert_eq!(paths.instructions_file, PathBuf::from("./instructions.html"));
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [defaults]
            langs = ["rs"]

            [paths]
            output_root = "/aoc/2022"
            data_dir = "../data"

            [remote]
            base_url = "http://localhost:8080"
            "#,
        );

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg.defaults.langs, vec![Lang::Rs]);
        assert_eq!(cfg.remote.base_url, "http://localhost:8080");
        // untouched keys keep their defaults
        assert_eq!(cfg.paths.instructions_file, PathBuf::from("instructions.html"));

        let paths = cfg.workspace();
        assert_eq!(paths.data_dir, PathBuf::from("/aoc/2022/../data"));
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let file = write_config("[defaults]\nlangs = [\"java\"]\n");
        assert!(AppConfig::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
