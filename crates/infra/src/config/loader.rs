//! Configuration loader
//!
//! Loads application configuration from a file, then lets environment
//! variables override individual fields.
//!
//! ## Loading Strategy
//! 1. Reads `.env` (if present) through `dotenvy`
//! 2. Loads the file named by `TALENTFOLIO_CONFIG`, or the first probed file
//! 3. Falls back to defaults when no file exists
//! 4. Applies environment overrides
//!
//! ## Environment Variables
//! - `TALENTFOLIO_CONFIG`: Explicit config file path
//! - `TALENTFOLIO_API_URL`: API base URL (absolute, or a path such as `/api/v1`)
//! - `TALENTFOLIO_ORIGIN`: Origin a relative base URL is resolved against
//! - `TALENTFOLIO_TIMEOUT_SECS`: Request timeout in seconds
//! - `TALENTFOLIO_LOG_LEVEL`: `EnvFilter` directive
//! - `TALENTFOLIO_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./talentfolio.json` or `./talentfolio.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use talentfolio_domain::{Config, PortalError, Result};

use crate::errors::InfraError;

pub const CONFIG_PATH_VAR: &str = "TALENTFOLIO_CONFIG";
pub const API_URL_VAR: &str = "TALENTFOLIO_API_URL";
pub const ORIGIN_VAR: &str = "TALENTFOLIO_ORIGIN";
pub const TIMEOUT_VAR: &str = "TALENTFOLIO_TIMEOUT_SECS";
pub const LOG_LEVEL_VAR: &str = "TALENTFOLIO_LOG_LEVEL";
pub const LOG_JSON_VAR: &str = "TALENTFOLIO_LOG_JSON";

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `PortalError::Config` if:
/// - `TALENTFOLIO_CONFIG` names a missing file
/// - A config file exists but cannot be parsed
/// - An override variable has an invalid value
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let explicit = std::env::var(CONFIG_PATH_VAR).ok().filter(|p| !p.trim().is_empty());
    let mut config = match explicit {
        Some(path) => load_from_file(Some(PathBuf::from(path)))?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(Some(path))?,
            None => {
                tracing::info!("No config file found; using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Defaults plus environment overrides, ignoring any config file
///
/// # Errors
/// Returns `PortalError::Config` if an override variable has an invalid
/// value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PortalError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PortalError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PortalError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents =
        std::fs::read_to_string(&config_path).map_err(|e| PortalError::from(InfraError::from(e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents).map_err(|e| InfraError::from(e).into()),
        _ => Err(PortalError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "config.json",
        "config.toml",
        "talentfolio.json",
        "talentfolio.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Overwrite fields of `config` from `TALENTFOLIO_*` variables.
///
/// Unset or empty variables leave the field alone.
///
/// # Errors
/// Returns `PortalError::Config` when `TALENTFOLIO_TIMEOUT_SECS` is not a
/// whole number.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(url) = env_opt(API_URL_VAR) {
        config.api.base_url = url;
    }
    if let Some(origin) = env_opt(ORIGIN_VAR) {
        config.api.origin = origin;
    }
    if let Some(timeout) = env_opt(TIMEOUT_VAR) {
        let secs = timeout
            .parse::<u64>()
            .map_err(|e| PortalError::Config(format!("Invalid timeout: {e}")))?;
        config.api.timeout_secs = Some(secs);
    }
    if let Some(level) = env_opt(LOG_LEVEL_VAR) {
        config.logging.level = level;
    }
    config.logging.json = env_bool(LOG_JSON_VAR, config.logging.json);
    Ok(())
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).ok().map_or(default, |s| {
        matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
    })
}
