//! Attachkit: File-Attachment Configuration for Chat Widgets
//!
//! Resolves the configuration of a chat widget's attachment buttons (image and
//! audio upload, camera capture, microphone recording, mixed files) from the
//! embedding service's defaults, the user's per-feature overrides and the
//! widget's base request settings.

pub mod capability;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod resolve;
pub mod types;

pub use capability::{MediaCapability, StaticCapability};
pub use error::{AttachError, CapabilityError, RenderError};
pub use markdown::{CmarkRenderer, MarkdownRenderer};
pub use resolve::{
    BuildStep, FallbackPolicy, FileTypesResolver, ResolvedAttachments, ResolvedFileConfig,
    ResolvedFileTypes, ResolvedFiles,
};
