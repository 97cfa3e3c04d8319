//! `fetch-day config`: inspect configuration values.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            if output.is_json() {
                output.json(&value)?;
            } else {
                output.print(&display_value(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                let serialised =
                    toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                        message: format!("Failed to serialise config: {e}"),
                        source: Some(Box::new(e)),
                    })?;
                output.print(serialised.trim_end())?;
            }
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `paths.data_dir`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let root = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    key.split('.')
        .try_fold(&root, |value, part| value.get(part))
        .filter(|value| !value.is_object())
        .cloned()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "paths.data_dir").unwrap();
        assert_eq!(display_value(&value), "data");
    }

    #[test]
    fn get_list_key_is_comma_joined() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "defaults.langs").unwrap();
        assert_eq!(display_value(&value), "go,rs,ts");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn get_section_is_error() {
        let cfg = AppConfig::default();
        assert!(get_config_value(&cfg, "paths").is_err());
    }

    #[test]
    fn get_no_color_default() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "output.no_color").unwrap();
        assert_eq!(display_value(&value), "false");
    }
}
