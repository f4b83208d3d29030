//! File Type Resolution
//!
//! Turns the user's per-feature overrides, the library defaults and the widget's
//! base request settings into the resolved attachment configuration the
//! rendering layer consumes. Five feature slots are processed in a fixed order
//! (images, camera, audio, microphone, mixed files) because the capture features
//! inherit from, and may fall back into, their upload siblings.

use crate::capability::MediaCapability;
use crate::error::AttachError;
use crate::markdown::{CmarkRenderer, MarkdownRenderer};
use crate::types::{
    AssistantConfig, DefaultFileTypes, Dimensions, FeatureOverride, InfoModal, RequestSettings,
    Style,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

pub mod parse;
pub mod steps;

pub use parse::{inherit_files, layer_files, merge_request};
pub use steps::{BuildStep, FallbackPolicy, FileTypesBuilder, Slot, StepInputs, StepRecord};

/// Resolved `files` section. `accepted_formats` is always set; an empty string
/// means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFiles {
    pub accepted_formats: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_number_of_files: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration_seconds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_modal: Option<InfoModal>,
}

impl ResolvedFiles {
    pub fn accepting(accepted_formats: &str) -> Self {
        Self {
            accepted_formats: accepted_formats.to_string(),
            ..Self::default()
        }
    }
}

/// Fully resolved configuration of one feature slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFileConfig {
    /// Info modal markdown rendered to HTML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_modal_text_markup: Option<String>,

    pub files: ResolvedFiles,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal_container_style: Option<Style>,

    /// Present only for structured overrides; always complete when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestSettings>,
}

impl ResolvedFileConfig {
    pub fn from_files(files: ResolvedFiles) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }
}

/// Upload slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFileTypes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ResolvedFileConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<ResolvedFileConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_files: Option<ResolvedFileConfig>,
}

/// Everything the rendering layer reads after a build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAttachments {
    pub request_settings: RequestSettings,

    #[serde(default)]
    pub file_types: ResolvedFileTypes,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<ResolvedFileConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_audio: Option<ResolvedFileConfig>,
}

impl ResolvedAttachments {
    pub fn new(request_settings: RequestSettings) -> Self {
        Self {
            request_settings,
            ..Self::default()
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&ResolvedFileConfig> {
        match slot {
            Slot::Images => self.file_types.images.as_ref(),
            Slot::Audio => self.file_types.audio.as_ref(),
            Slot::MixedFiles => self.file_types.mixed_files.as_ref(),
            Slot::Camera => self.camera.as_ref(),
            Slot::RecordAudio => self.record_audio.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<ResolvedFileConfig> {
        match slot {
            Slot::Images => &mut self.file_types.images,
            Slot::Audio => &mut self.file_types.audio,
            Slot::MixedFiles => &mut self.file_types.mixed_files,
            Slot::Camera => &mut self.camera,
            Slot::RecordAudio => &mut self.record_audio,
        }
    }

    /// Slots that ended up populated, in `Slot::ALL` order
    pub fn populated_slots(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| self.slot(*slot).is_some())
            .collect()
    }
}

/// Resolver for the attachment feature slots
///
/// Holds the markdown renderer, the optional media capability provider and the
/// fallback policy. A resolver without a capability provider behaves like a
/// runtime with no capture API.
pub struct FileTypesResolver {
    renderer: Box<dyn MarkdownRenderer>,
    capability: Option<Box<dyn MediaCapability>>,
    fallback: FallbackPolicy,
}

impl fmt::Debug for FileTypesResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileTypesResolver")
            .field("capability", &self.capability.is_some())
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl Default for FileTypesResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTypesResolver {
    /// CommonMark renderer, no capability provider, default fallback policy
    pub fn new() -> Self {
        Self {
            renderer: Box::new(CmarkRenderer::default()),
            capability: None,
            fallback: FallbackPolicy::default(),
        }
    }

    pub fn with_renderer<R: MarkdownRenderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_capability<C: MediaCapability + 'static>(mut self, capability: C) -> Self {
        self.capability = Some(Box::new(capability));
        self
    }

    pub fn with_fallback_policy(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Resolve one feature from explicit defaults with this resolver's renderer
    pub fn parse_config(
        &self,
        base: &RequestSettings,
        default_files: ResolvedFiles,
        feature: Option<&FeatureOverride>,
    ) -> Result<ResolvedFileConfig, AttachError> {
        Ok(parse::parse_config(
            base,
            default_files,
            feature,
            self.renderer.as_ref(),
        )?)
    }

    /// Run a single build step against a builder
    pub fn run_step(
        &self,
        step: BuildStep,
        builder: FileTypesBuilder,
        inputs: &StepInputs<'_>,
    ) -> Result<FileTypesBuilder, AttachError> {
        let env = steps::StepEnv {
            renderer: self.renderer.as_ref(),
            capability: self.capability.as_deref(),
            fallback: self.fallback,
        };
        step.apply(builder, inputs, &env)
    }

    /// Run every step in `BuildStep::ORDER` and return the builder
    pub fn run(
        &self,
        request_settings: &RequestSettings,
        assistant: &AssistantConfig,
        defaults: Option<&DefaultFileTypes>,
    ) -> Result<FileTypesBuilder, AttachError> {
        let inputs = StepInputs {
            assistant,
            defaults,
        };
        let builder = BuildStep::ORDER.into_iter().try_fold(
            FileTypesBuilder::new(request_settings.clone()),
            |builder, step| self.run_step(step, builder, &inputs),
        )?;

        info!(
            slots = ?builder.resolved().populated_slots(),
            "Resolved attachment file types"
        );
        Ok(builder)
    }

    /// Build the resolved attachments
    pub fn build(
        &self,
        request_settings: &RequestSettings,
        assistant: &AssistantConfig,
        defaults: Option<&DefaultFileTypes>,
    ) -> Result<ResolvedAttachments, AttachError> {
        Ok(self.run(request_settings, assistant, defaults)?.finish())
    }

    /// Build and return the per-step record alongside the result
    pub fn build_traced(
        &self,
        request_settings: &RequestSettings,
        assistant: &AssistantConfig,
        defaults: Option<&DefaultFileTypes>,
    ) -> Result<(ResolvedAttachments, Vec<StepRecord>), AttachError> {
        Ok(self.run(request_settings, assistant, defaults)?.into_parts())
    }
}
