//! Ordered build steps over a [`FileTypesBuilder`].
//!
//! Camera must run after images and microphone after audio: a capture step reads
//! its upload sibling's resolved files as defaults and, when capture is
//! unavailable, decides whether to write into the sibling slot.

use crate::capability::{probe_user_media, MediaCapability};
use crate::error::AttachError;
use crate::markdown::MarkdownRenderer;
use crate::resolve::parse::{inherit_files, layer_files, parse_config};
use crate::resolve::{ResolvedAttachments, ResolvedFileConfig};
use crate::types::{
    is_enabled, AssistantConfig, DefaultFileTypes, FeatureOverride, FileServiceDefaults,
    FilesServiceConfig, RequestSettings,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const IMAGE_FORMATS: &str = "image/*";
const AUDIO_FORMATS: &str = "audio/*";
const ANY_FORMAT: &str = "";

/// One step of the build, in the order it must run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStep {
    Images,
    Camera,
    Audio,
    Microphone,
    MixedFiles,
}

impl BuildStep {
    pub const ORDER: [BuildStep; 5] = [
        BuildStep::Images,
        BuildStep::Camera,
        BuildStep::Audio,
        BuildStep::Microphone,
        BuildStep::MixedFiles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStep::Images => "images",
            BuildStep::Camera => "camera",
            BuildStep::Audio => "audio",
            BuildStep::Microphone => "microphone",
            BuildStep::MixedFiles => "mixed_files",
        }
    }

    pub(crate) fn apply(
        self,
        builder: FileTypesBuilder,
        inputs: &StepInputs<'_>,
        env: &StepEnv<'_>,
    ) -> Result<FileTypesBuilder, AttachError> {
        let assistant = inputs.assistant;
        let defaults = inputs.defaults;
        match self {
            BuildStep::Images => upload_step(
                self,
                Slot::Images,
                IMAGE_FORMATS,
                assistant.images.as_ref(),
                defaults.and_then(|d| d.images.as_ref()),
                builder,
                env,
            ),
            BuildStep::Audio => upload_step(
                self,
                Slot::Audio,
                AUDIO_FORMATS,
                assistant.audio.as_ref(),
                defaults.and_then(|d| d.audio.as_ref()),
                builder,
                env,
            ),
            BuildStep::MixedFiles => upload_step(
                self,
                Slot::MixedFiles,
                ANY_FORMAT,
                assistant.mixed_files.as_ref(),
                None,
                builder,
                env,
            ),
            BuildStep::Camera => capture_step(Capture::Camera, assistant, builder, env),
            BuildStep::Microphone => capture_step(Capture::Microphone, assistant, builder, env),
        }
    }
}

impl std::fmt::Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output slot a step may write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Images,
    Audio,
    MixedFiles,
    Camera,
    RecordAudio,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Images,
        Slot::Audio,
        Slot::MixedFiles,
        Slot::Camera,
        Slot::RecordAudio,
    ];
}

/// What a step did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: BuildStep,

    /// Slot written by the step, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written: Option<Slot>,

    /// Capability answer, for capture steps that probed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_media: Option<bool>,
}

/// When a capture feature without capture support may take over its upload sibling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// The sibling's own override (`images` / `audio`) is absent or `false`
    #[default]
    OverrideAbsent,
    /// No earlier step has written the sibling slot
    SlotUnpopulated,
}

impl FallbackPolicy {
    pub fn sibling_unconfigured(
        &self,
        sibling_override: Option<&FeatureOverride>,
        sibling_slot: Option<&ResolvedFileConfig>,
    ) -> bool {
        match self {
            FallbackPolicy::OverrideAbsent => !is_enabled(sibling_override),
            FallbackPolicy::SlotUnpopulated => sibling_slot.is_none(),
        }
    }
}

/// Borrowed inputs shared by every step
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    pub assistant: &'a AssistantConfig,
    pub defaults: Option<&'a DefaultFileTypes>,
}

pub(crate) struct StepEnv<'a> {
    pub(crate) renderer: &'a dyn MarkdownRenderer,
    pub(crate) capability: Option<&'a dyn MediaCapability>,
    pub(crate) fallback: FallbackPolicy,
}

/// Accumulates resolved slots across steps
#[derive(Debug, Clone, PartialEq)]
pub struct FileTypesBuilder {
    resolved: ResolvedAttachments,
    trace: Vec<StepRecord>,
}

impl FileTypesBuilder {
    pub fn new(request_settings: RequestSettings) -> Self {
        Self {
            resolved: ResolvedAttachments::new(request_settings),
            trace: Vec::with_capacity(BuildStep::ORDER.len()),
        }
    }

    pub fn resolved(&self) -> &ResolvedAttachments {
        &self.resolved
    }

    pub fn trace(&self) -> &[StepRecord] {
        &self.trace
    }

    pub fn finish(self) -> ResolvedAttachments {
        self.resolved
    }

    pub fn into_parts(self) -> (ResolvedAttachments, Vec<StepRecord>) {
        (self.resolved, self.trace)
    }

    fn write(mut self, slot: Slot, config: ResolvedFileConfig) -> Self {
        *self.resolved.slot_mut(slot) = Some(config);
        self
    }

    fn record(mut self, step: BuildStep, written: Option<Slot>, user_media: Option<bool>) -> Self {
        debug!(step = %step, written = ?written, user_media = ?user_media, "Build step done");
        self.trace.push(StepRecord {
            step,
            written,
            user_media,
        });
        self
    }
}

fn upload_step(
    step: BuildStep,
    slot: Slot,
    default_format: &str,
    feature: Option<&FeatureOverride>,
    library_defaults: Option<&FileServiceDefaults>,
    builder: FileTypesBuilder,
    env: &StepEnv<'_>,
) -> Result<FileTypesBuilder, AttachError> {
    if library_defaults.is_none() && !is_enabled(feature) {
        return Ok(builder.record(step, None, None));
    }

    let default_files = layer_files(
        default_format,
        library_defaults.and_then(|d| d.files.as_ref()),
    );
    let config = parse_config(
        &builder.resolved.request_settings,
        default_files,
        feature,
        env.renderer,
    )?;
    Ok(builder.write(slot, config).record(step, Some(slot), None))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Camera,
    Microphone,
}

impl Capture {
    fn step(self) -> BuildStep {
        match self {
            Capture::Camera => BuildStep::Camera,
            Capture::Microphone => BuildStep::Microphone,
        }
    }

    fn feature(self, assistant: &AssistantConfig) -> Option<&FeatureOverride> {
        match self {
            Capture::Camera => assistant.camera.as_ref(),
            Capture::Microphone => assistant.microphone_audio.as_ref(),
        }
    }

    fn sibling_override(self, assistant: &AssistantConfig) -> Option<&FeatureOverride> {
        match self {
            Capture::Camera => assistant.images.as_ref(),
            Capture::Microphone => assistant.audio.as_ref(),
        }
    }

    fn upload_slot(self) -> Slot {
        match self {
            Capture::Camera => Slot::Images,
            Capture::Microphone => Slot::Audio,
        }
    }

    fn capture_slot(self) -> Slot {
        match self {
            Capture::Camera => Slot::Camera,
            Capture::Microphone => Slot::RecordAudio,
        }
    }

    fn default_format(self) -> &'static str {
        match self {
            Capture::Camera => IMAGE_FORMATS,
            Capture::Microphone => AUDIO_FORMATS,
        }
    }

    /// Fields the generic parser leaves alone. Assigned from the override even
    /// when unset there, replacing anything inherited from the sibling.
    fn layer_capture_fields(self, config: &mut ResolvedFileConfig, custom: &FilesServiceConfig) {
        if self == Capture::Camera {
            config.modal_container_style = custom.modal_container_style.clone();
        }
        let Some(files) = &custom.files else {
            return;
        };
        config.files.format = files.format.clone();
        match self {
            Capture::Camera => config.files.dimensions = files.dimensions,
            Capture::Microphone => config.files.max_duration_seconds = files.max_duration_seconds,
        }
    }
}

fn capture_step(
    capture: Capture,
    assistant: &AssistantConfig,
    builder: FileTypesBuilder,
    env: &StepEnv<'_>,
) -> Result<FileTypesBuilder, AttachError> {
    let step = capture.step();
    let feature = capture.feature(assistant);
    if !is_enabled(feature) {
        return Ok(builder.record(step, None, None));
    }

    let upload_slot = capture.upload_slot();
    let default_files = inherit_files(
        capture.default_format(),
        builder.resolved.slot(upload_slot).map(|config| &config.files),
    );

    let user_media = probe_user_media(env.capability);
    if user_media {
        let mut config = parse_config(
            &builder.resolved.request_settings,
            default_files,
            feature,
            env.renderer,
        )?;
        let mut builder = builder;
        if let Some(custom) = feature.and_then(FeatureOverride::custom) {
            capture.layer_capture_fields(&mut config, custom);
            if capture == Capture::Microphone {
                backfill_upload_count(&mut builder.resolved, upload_slot, custom);
            }
        }
        let capture_slot = capture.capture_slot();
        return Ok(builder
            .write(capture_slot, config)
            .record(step, Some(capture_slot), Some(true)));
    }

    let sibling_unconfigured = env.fallback.sibling_unconfigured(
        capture.sibling_override(assistant),
        builder.resolved.slot(upload_slot),
    );
    if !sibling_unconfigured {
        debug!(step = %step, "Capture unavailable and upload sibling configured; keeping sibling");
        return Ok(builder.record(step, None, Some(false)));
    }

    let config = parse_config(
        &builder.resolved.request_settings,
        default_files,
        feature,
        env.renderer,
    )?;
    Ok(builder
        .write(upload_slot, config)
        .record(step, Some(upload_slot), Some(false)))
}

/// Recording defaults may supply a file count the upload sibling left unset.
fn backfill_upload_count(
    resolved: &mut ResolvedAttachments,
    upload_slot: Slot,
    custom: &FilesServiceConfig,
) {
    let Some(files) = &custom.files else {
        return;
    };
    if let Some(upload) = resolved.slot_mut(upload_slot).as_mut() {
        if upload.files.max_number_of_files.is_none() {
            upload.files.max_number_of_files = files.max_number_of_files;
        }
    }
}
