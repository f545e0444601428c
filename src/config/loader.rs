//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Root config file
    /// 3. Built-in defaults
    ///
    /// Command-line flags are applied on top by the caller.
    pub fn load() -> Result<Config> {
        let mut config = Self::load_defaults();

        let root_path = paths::root_config_path();
        if root_path.exists() {
            config = Self::load_file(&root_path)?;
        } else {
            tracing::debug!("No config file at {}, using defaults", root_path.display());
        }

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load a config file, using defaults only when it does not exist.
    ///
    /// A file that exists but cannot be read or parsed is an error, so callers
    /// that save afterwards never replace it with defaults.
    pub fn load_file_or_defaults(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load_file(path)
        } else {
            Ok(Self::load_defaults())
        }
    }

    /// Validate the root config file and environment overrides
    pub fn validate() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            Self::load_file(&root_path)?;
        }

        if let Ok(validate) = std::env::var("TOKENSECRET_VALIDATE") {
            validate
                .parse::<crate::create::ValidationDirective>()
                .map_err(|e| anyhow::anyhow!("TOKENSECRET_VALIDATE: {}", e))?;
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(field_manager) = std::env::var("TOKENSECRET_FIELD_MANAGER") {
            config.field_manager = field_manager;
        }

        if let Ok(validate) = std::env::var("TOKENSECRET_VALIDATE") {
            match validate.parse() {
                Ok(directive) => config.validate = directive,
                Err(e) => tracing::warn!("Ignoring TOKENSECRET_VALIDATE: {}", e),
            }
        }

        if let Ok(output) = std::env::var("TOKENSECRET_OUTPUT") {
            match <crate::printer::OutputFormat as clap::ValueEnum>::from_str(&output, true) {
                Ok(format) => config.output = Some(format),
                Err(e) => tracing::warn!("Ignoring TOKENSECRET_OUTPUT: {}", e),
            }
        }

        if let Ok(save_config) = std::env::var("TOKENSECRET_SAVE_CONFIG") {
            if let Ok(val) = save_config.parse::<bool>() {
                config.save_config = val;
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create::ValidationDirective;
    use crate::printer::OutputFormat;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.field_manager, "kubectl-create");
        assert_eq!(config.validate, ValidationDirective::Strict);
    }

    #[test]
    fn test_save_and_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");
        let config = Config {
            field_manager: "ci-bot".to_string(),
            validate: ValidationDirective::Ignore,
            output: Some(OutputFormat::Json),
            save_config: true,
        };

        ConfigLoader::save(&config, &path).unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_file_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load_file(&tmp.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_file_invalid_yaml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "fieldManager: [unclosed").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_load_file_or_defaults_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_file_or_defaults(&tmp.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_file_or_defaults_keeps_malformed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "fieldManager: [unclosed").unwrap();

        assert!(ConfigLoader::load_file_or_defaults(&path).is_err());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "fieldManager: [unclosed"
        );
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // These variables are only read by this test.
        unsafe {
            std::env::set_var("TOKENSECRET_FIELD_MANAGER", "from-env");
            std::env::set_var("TOKENSECRET_VALIDATE", "warn");
            std::env::set_var("TOKENSECRET_OUTPUT", "yaml");
            std::env::set_var("TOKENSECRET_SAVE_CONFIG", "true");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.field_manager, "from-env");
        assert_eq!(config.validate, ValidationDirective::Warn);
        assert_eq!(config.output, Some(OutputFormat::Yaml));
        assert!(config.save_config);

        // SAFETY: see above
        unsafe {
            std::env::remove_var("TOKENSECRET_FIELD_MANAGER");
            std::env::remove_var("TOKENSECRET_VALIDATE");
            std::env::remove_var("TOKENSECRET_OUTPUT");
            std::env::remove_var("TOKENSECRET_SAVE_CONFIG");
        }
    }
}
