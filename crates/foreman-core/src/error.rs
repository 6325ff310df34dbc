//! Error types for the Foreman controller.

use thiserror::Error;

/// A shared error type for the Foreman workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum ForemanError {
    /// Network-level failure reaching the backend (unreachable, timed out)
    #[error("Backend unreachable: {0}")]
    Transport(String),

    /// The backend answered with a non-success status code
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ForemanError {
    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the backend is unreachable or unhealthy.
    ///
    /// Used by callers that surface an "offline" indicator instead of a
    /// transcript entry.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Api { .. })
    }
}

impl From<reqwest::Error> for ForemanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ForemanError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ForemanError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ForemanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, ForemanError>`.
pub type Result<T> = std::result::Result<T, ForemanError>;
