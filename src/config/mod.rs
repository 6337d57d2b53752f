pub mod schema;

pub use schema::{ResultRole, ToolStyle, WeathercallConfig};

use crate::error::WeathercallError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default weathercall home directory (~/.weathercall).
pub fn default_home_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().join(".weathercall"))
        .unwrap_or_else(|| PathBuf::from(".weathercall"))
}

/// Default config file location.
pub fn default_config_path() -> PathBuf {
    default_home_dir().join("weathercall.toml")
}

/// Expand a user-supplied path that may start with `~`.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load config from the given path, or return defaults.
pub fn load_config(path: &Path) -> Result<WeathercallConfig> {
    if path.exists() {
        let contents =
            std::fs::read_to_string(path).context("Failed to read weathercall config file")?;
        let config: WeathercallConfig =
            toml::from_str(&contents).context("Failed to parse weathercall config (TOML)")?;
        Ok(config)
    } else {
        Ok(WeathercallConfig::default())
    }
}

/// Read the API key named by `config.api_key_env` through `lookup`.
///
/// `lookup` is `std::env::var(..).ok()` in the binary; tests pass a map.
pub fn resolve_api_key<F>(
    config: &WeathercallConfig,
    lookup: F,
) -> std::result::Result<String, WeathercallError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(&config.api_key_env) {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(WeathercallError::MissingCredential(
            config.api_key_env.clone(),
        )),
    }
}
