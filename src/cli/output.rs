//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::AttachError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &AttachError) -> String {
    match e {
        AttachError::ConfigError(msg) => format!("Configuration problem:\n{}", msg),
        other => other.to_string(),
    }
}
