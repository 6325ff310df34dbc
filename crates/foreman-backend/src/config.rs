//! Backend configuration.
//!
//! Supports reading `~/.config/foreman/config.toml`, with environment
//! variable overrides for the URL and API key.

use foreman_core::error::{ForemanError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8787";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the assistant backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Loads the configuration.
    ///
    /// Priority:
    /// 1. `FOREMAN_BACKEND_URL` / `FOREMAN_API_KEY` environment variables
    /// 2. `~/.config/foreman/config.toml`
    /// 3. Built-in defaults
    ///
    /// A missing config file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path)?,
            _ => Self::default(),
        };

        if let Ok(url) = std::env::var("FOREMAN_BACKEND_URL") {
            config.base_url = url;
        }
        if let Ok(key) = std::env::var("FOREMAN_API_KEY") {
            config.api_key = Some(key);
        }

        Ok(config)
    }

    /// Loads the configuration from a specific TOML file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ForemanError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Returns the path to the configuration file: ~/.config/foreman/config.toml
fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("foreman").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://foreman.example.com\"\napi_key = \"sekrit\""
        )
        .unwrap();

        let config = BackendConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.base_url, "https://foreman.example.com");
        assert_eq!(config.api_key.as_deref(), Some("sekrit"));
        // Unset fields fall back to defaults.
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_from_path_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [not toml").unwrap();

        let result = BackendConfig::load_from_path(file.path());
        assert!(result.is_err());
    }
}
