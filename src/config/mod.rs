//! Configuration system for tokensecret
//!
//! Layered configuration: built-in defaults, the root YAML file, then
//! environment overrides. Command-line flags are applied last by the CLI.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Config;

use crate::printer::OutputFormat;
use anyhow::Context;

/// Get a configuration value by key
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "fieldManager" => Ok(config.field_manager.clone()),
        "validate" => Ok(config.validate.to_string()),
        "output" => Ok(config
            .output
            .and_then(|format| clap::ValueEnum::to_possible_value(&format))
            .map(|value| value.get_name().to_string())
            .unwrap_or_default()),
        "saveConfig" => Ok(config.save_config.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "fieldManager" => {
            config.field_manager = value.to_string();
        }
        "validate" => {
            config.validate = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        "output" => {
            if value.is_empty() {
                config.output = None;
            } else {
                let format = <OutputFormat as clap::ValueEnum>::from_str(value, true)
                    .map_err(|e| anyhow::anyhow!(e))
                    .context("output must be one of: json, yaml, name")?;
                config.output = Some(format);
            }
        }
        "saveConfig" => {
            config.save_config = value
                .parse()
                .context("saveConfig must be 'true' or 'false'")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
