//! Configuration structures
//!
//! Loaded by `talentfolio_infra::config`. Every field has a default so an
//! empty file (or no file at all) yields a working configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_BASE, DEFAULT_ORIGIN};

/// Root configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Absolute URL, or a path resolved against `origin`
    pub base_url: String,
    /// Origin used when `base_url` is relative (same-origin proxy setup)
    pub origin: String,
    /// Request timeout; none by default
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Absolute base URL with any trailing slash removed.
    pub fn resolved_base_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            let origin = self.origin.trim_end_matches('/');
            let path = base.trim_start_matches('/');
            if path.is_empty() {
                origin.to_string()
            } else {
                format!("{origin}/{path}")
            }
        }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `talentfolio_infra=debug`
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_base_is_resolved_against_origin() {
        let api = ApiConfig::default();
        assert_eq!(api.resolved_base_url(), "http://localhost:3000/api/v1");
    }

    #[test]
    fn absolute_base_loses_trailing_slash() {
        let api = ApiConfig { base_url: "https://api.example.com/v1/".into(), ..Default::default() };
        assert_eq!(api.resolved_base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.logging.level, "info");
    }
}
