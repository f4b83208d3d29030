//! Input data model: request settings, per-feature overrides and library defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HTTP headers sent with file uploads
pub type Headers = BTreeMap<String, String>;

/// CSS-like style declarations (property -> value)
pub type Style = BTreeMap<String, String>;

fn default_method() -> String {
    "POST".to_string()
}

/// Transport defaults inherited by every file feature unless overridden
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSettings {
    #[serde(default = "default_method")]
    pub method: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub headers: Headers,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            headers: Headers::new(),
            method: default_method(),
            url: String::new(),
        }
    }
}

/// Partial request settings supplied by a feature override
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
}

/// Info modal shown before the user picks a file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoModal {
    /// Markdown body of the modal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_markdown: Option<String>,

    /// Only show the modal the first time the button is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_modal_once: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_style: Option<Style>,
}

/// Capture dimensions for camera photos (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// The `files` section of a feature override or library default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachments {
    /// Comma separated MIME types or extensions, e.g. `image/*` or `.png,.jpg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_formats: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_number_of_files: Option<u32>,

    /// Output encoding for captured media (camera: png/jpeg, microphone: mp3/wav/...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Microphone only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_seconds: Option<u32>,

    /// Camera only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_modal: Option<InfoModal>,
}

/// Structured customization of one feature slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilesServiceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FileAttachments>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestOverride>,

    /// Button appearance, passed through untouched to the rendering layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<serde_json::Value>,

    /// Camera only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal_container_style: Option<Style>,
}

/// User override for one feature slot: a flag or a structured config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureOverride {
    Flag(bool),
    Custom(FilesServiceConfig),
}

impl FeatureOverride {
    /// `true` and any structured config enable the feature; `false` does not.
    pub fn is_enabled(&self) -> bool {
        match self {
            FeatureOverride::Flag(enabled) => *enabled,
            FeatureOverride::Custom(_) => true,
        }
    }

    /// The structured config, if this override carries one
    pub fn custom(&self) -> Option<&FilesServiceConfig> {
        match self {
            FeatureOverride::Flag(_) => None,
            FeatureOverride::Custom(config) => Some(config),
        }
    }
}

impl From<bool> for FeatureOverride {
    fn from(enabled: bool) -> Self {
        FeatureOverride::Flag(enabled)
    }
}

impl From<FilesServiceConfig> for FeatureOverride {
    fn from(config: FilesServiceConfig) -> Self {
        FeatureOverride::Custom(config)
    }
}

/// Whether an optional override enables its feature
pub fn is_enabled(feature: Option<&FeatureOverride>) -> bool {
    feature.map(FeatureOverride::is_enabled).unwrap_or(false)
}

/// Assistant-level configuration: the user's per-feature overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<FeatureOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<FeatureOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<FeatureOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microphone_audio: Option<FeatureOverride>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_files: Option<FeatureOverride>,
}

/// Library-level defaults for one upload feature, supplied by the embedding service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileServiceDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<FileAttachments>,
}

/// Library-level default file types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultFileTypes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<FileServiceDefaults>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<FileServiceDefaults>,
}
