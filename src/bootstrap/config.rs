//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Load `.env` into the process environment
//! - Read the TOML configuration file and map it to the `AppConfig` DTO
//! - Apply `CLIPSYNC_STORE_*` environment overrides
//!
//! Defaults live in the DTO mapping; this module only decides which sources
//! are read and in which order (file, then environment).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use cs_core::config::AppConfig;

/// Load a `.env` file from the working directory or its parents.
///
/// Returns the loaded path, or `None` when there is no `.env` file.
pub fn load_dotenv() -> anyhow::Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err).context("Failed to load .env file"),
    }
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Resolve the effective configuration.
///
/// - `explicit` (from `--config`) must exist.
/// - Otherwise `default_path` is read when present, else defaults are used.
/// - Environment variables override file values in both cases.
pub fn resolve_config(
    explicit: Option<&Path>,
    default_path: Option<&Path>,
) -> anyhow::Result<AppConfig> {
    let mut config = match (explicit, default_path) {
        (Some(path), _) => {
            if !path.exists() {
                bail!("Config file does not exist: {}", path.display());
            }
            load_config(path)?
        }
        (None, Some(path)) if path.exists() => load_config(path)?,
        _ => AppConfig::default(),
    };

    config.apply_env_overrides(|name| std::env::var(name).ok());
    Ok(config)
}
