//! Configuration System
//!
//! Widget configuration as loaded from layered sources: built-in defaults, the
//! global user file, project files and `ATTACHKIT__` environment variables.
//! The root [`WidgetConfig`] carries the base request settings, the library
//! defaults, the assistant's per-feature overrides and the knobs for the
//! resolver's collaborators.

use crate::capability::CapabilityConfig;
use crate::error::AttachError;
use crate::logging::LoggingConfig;
use crate::markdown::{CmarkRenderer, MarkdownConfig};
use crate::resolve::{FallbackPolicy, FileTypesResolver, ResolvedAttachments, StepRecord};
use crate::types::{AssistantConfig, DefaultFileTypes, FeatureOverride, RequestSettings};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

const HTTP_METHODS: [&str; 5] = ["GET", "POST", "PUT", "PATCH", "DELETE"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Base transport settings inherited by every feature
    #[serde(default)]
    pub request: RequestSettings,

    /// Library-level defaults supplied by the embedding service
    #[serde(default)]
    pub defaults: DefaultFileTypes,

    /// Per-feature user overrides
    #[serde(default)]
    pub assistant: AssistantConfig,

    #[serde(default)]
    pub capabilities: CapabilityConfig,

    #[serde(default)]
    pub markdown: MarkdownConfig,

    #[serde(default)]
    pub resolution: ResolutionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Resolver behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// When a capture feature without device support takes over its upload sibling
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Request(String),
    Feature(String, String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Request(msg) => write!(f, "Request: {}", msg),
            ValidationError::Feature(name, msg) => write!(f, "Feature '{}': {}", name, msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

fn validate_method(method: &str) -> Result<(), String> {
    if HTTP_METHODS.contains(&method.to_ascii_uppercase().as_str()) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported method '{}' (expected one of {})",
            method,
            HTTP_METHODS.join(", ")
        ))
    }
}

fn validate_headers<'a>(names: impl Iterator<Item = &'a String>) -> Result<(), String> {
    for name in names {
        if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
            return Err(format!("Invalid header name '{}'", name));
        }
    }
    Ok(())
}

fn validate_feature(feature: &FeatureOverride) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(custom) = feature.custom() else {
        return problems;
    };

    if let Some(request) = &custom.request {
        if let Some(method) = request.method.as_deref().filter(|m| !m.is_empty()) {
            if let Err(e) = validate_method(method) {
                problems.push(e);
            }
        }
        if let Some(headers) = &request.headers {
            if let Err(e) = validate_headers(headers.keys()) {
                problems.push(e);
            }
        }
    }

    if let Some(files) = &custom.files {
        if let Some(dimensions) = files.dimensions {
            if dimensions.width == Some(0) || dimensions.height == Some(0) {
                problems.push("Dimensions must be greater than zero".to_string());
            }
        }
        if files.max_duration_seconds == Some(0) {
            problems.push("max_duration_seconds must be greater than zero".to_string());
        }
    }

    problems
}

impl WidgetConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = validate_method(&self.request.method) {
            errors.push(ValidationError::Request(e));
        }
        if let Err(e) = validate_headers(self.request.headers.keys()) {
            errors.push(ValidationError::Request(e));
        }

        let assistant = &self.assistant;
        let features = [
            ("images", assistant.images.as_ref()),
            ("audio", assistant.audio.as_ref()),
            ("camera", assistant.camera.as_ref()),
            ("microphone_audio", assistant.microphone_audio.as_ref()),
            ("mixed_files", assistant.mixed_files.as_ref()),
        ];
        for (name, feature) in features {
            let Some(feature) = feature else {
                continue;
            };
            for problem in validate_feature(feature) {
                errors.push(ValidationError::Feature(name.to_string(), problem));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Resolver wired with this configuration's renderer, capability and fallback policy
    pub fn resolver(&self) -> FileTypesResolver {
        let resolver = FileTypesResolver::new()
            .with_renderer(CmarkRenderer::new(self.markdown.clone()))
            .with_fallback_policy(self.resolution.fallback);
        match self.capabilities.provider() {
            Some(capability) => resolver.with_capability(capability),
            None => resolver,
        }
    }

    /// Resolve the attachment slots described by this configuration
    pub fn resolve(&self) -> Result<ResolvedAttachments, AttachError> {
        self.resolver()
            .build(&self.request, &self.assistant, Some(&self.defaults))
    }

    /// Resolve and keep the per-step record
    pub fn resolve_traced(&self) -> Result<(ResolvedAttachments, Vec<StepRecord>), AttachError> {
        self.resolver()
            .build_traced(&self.request, &self.assistant, Some(&self.defaults))
    }
}
