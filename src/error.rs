//! Error types for attachment configuration resolution.

use thiserror::Error;

/// Markdown renderer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Markdown rendering failed: {0}")]
    Failed(String),
}

/// Media capability probe errors
///
/// These never escape the resolver: a failed probe is treated the same as a
/// runtime without the capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("Capability probe failed: {0}")]
    ProbeFailed(String),

    #[error("Capability not supported by runtime")]
    Unsupported,
}

/// Crate-level errors
#[derive(Debug, Error)]
pub enum AttachError {
    #[error("Info modal rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for AttachError {
    fn from(err: config::ConfigError) -> Self {
        AttachError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for AttachError {
    fn from(err: serde_json::Error) -> Self {
        AttachError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for AttachError {
    fn from(err: toml::ser::Error) -> Self {
        AttachError::Serialization(err.to_string())
    }
}
