//! Presentation: serializers and text formatters for command results.

use crate::config::ValidationError;
use crate::error::AttachError;
use crate::resolve::{ResolvedAttachments, StepRecord};
use serde::Serialize;
use std::str::FromStr;

/// Structured output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Toml,
}

impl FromStr for OutputFormat {
    type Err = AttachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "toml" => Ok(OutputFormat::Toml),
            other => Err(AttachError::InvalidArgument(format!(
                "Unknown output format '{}' (must be 'json' or 'toml')",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct TracedOutput<'a> {
    resolved: &'a ResolvedAttachments,
    trace: &'a [StepRecord],
}

pub(crate) fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, AttachError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Toml => Ok(toml::to_string_pretty(value)?),
    }
}

/// Serialize resolved attachments, optionally with the build record
pub fn format_resolved(
    resolved: &ResolvedAttachments,
    trace: Option<&[StepRecord]>,
    format: OutputFormat,
) -> Result<String, AttachError> {
    match trace {
        Some(trace) => serialize(&TracedOutput { resolved, trace }, format),
        None => serialize(resolved, format),
    }
}

pub fn format_validation_result(result: &Result<(), Vec<ValidationError>>) -> String {
    match result {
        Ok(()) => "Configuration is valid".to_string(),
        Err(errors) => {
            let mut s = format!("Configuration has {} problem(s):", errors.len());
            for e in errors {
                s.push_str(&format!("\n  - {}", e));
            }
            s
        }
    }
}
