//! Configuration file location

use directories::ProjectDirs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "tokensecret";

/// Environment variable that pins the configuration directory
pub const CONFIG_DIR_ENV: &str = "TOKENSECRET_CONFIG_DIR";

/// Directory holding `config.yaml`
///
/// `TOKENSECRET_CONFIG_DIR` wins, then a non-empty `XDG_CONFIG_HOME`, then the
/// platform config directory. Falls back to `./.config/tokensecret` when no
/// home directory can be determined.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = non_empty_env(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    if let Some(xdg) = non_empty_env("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".config").join(APP_NAME))
}

fn non_empty_env(key: &str) -> Option<OsString> {
    std::env::var_os(key).filter(|value| !value.is_empty())
}

/// Get the root configuration file path
pub fn root_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
