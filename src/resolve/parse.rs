//! Generic feature parser and the explicit field merges it is built from.
//!
//! Every fallback is spelled out field by field. In a feature override a string
//! counts as present only when non-empty, a file count only when non-zero.
//! Library defaults and inherited sibling files are taken as given, so an empty
//! `accepted_formats` there means no restriction.

use crate::error::RenderError;
use crate::markdown::MarkdownRenderer;
use crate::resolve::{ResolvedFileConfig, ResolvedFiles};
use crate::types::{FeatureOverride, FileAttachments, RequestOverride, RequestSettings};

fn non_empty(value: Option<&String>) -> Option<&String> {
    value.filter(|s| !s.is_empty())
}

fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|n| *n > 0)
}

/// Build a feature's default files: the feature's format, then every field the
/// layer sets on top.
pub fn layer_files(default_format: &str, layer: Option<&FileAttachments>) -> ResolvedFiles {
    let mut files = ResolvedFiles::accepting(default_format);
    let Some(layer) = layer else {
        return files;
    };
    if let Some(formats) = &layer.accepted_formats {
        files.accepted_formats = formats.clone();
    }
    if layer.max_number_of_files.is_some() {
        files.max_number_of_files = layer.max_number_of_files;
    }
    if layer.info_modal.is_some() {
        files.info_modal = layer.info_modal.clone();
    }
    if layer.format.is_some() {
        files.format = layer.format.clone();
    }
    if layer.dimensions.is_some() {
        files.dimensions = layer.dimensions;
    }
    if layer.max_duration_seconds.is_some() {
        files.max_duration_seconds = layer.max_duration_seconds;
    }
    files
}

/// Inherit a sibling slot's resolved files, or start from the default format.
pub fn inherit_files(default_format: &str, sibling: Option<&ResolvedFiles>) -> ResolvedFiles {
    sibling
        .cloned()
        .unwrap_or_else(|| ResolvedFiles::accepting(default_format))
}

/// Field-level request fallback: each of headers, method and url comes from
/// the override when set, otherwise from the base settings.
pub fn merge_request(base: &RequestSettings, request: Option<&RequestOverride>) -> RequestSettings {
    let headers = request
        .and_then(|r| r.headers.as_ref())
        .unwrap_or(&base.headers);
    let method = non_empty(request.and_then(|r| r.method.as_ref())).unwrap_or(&base.method);
    let url = non_empty(request.and_then(|r| r.url.as_ref())).unwrap_or(&base.url);

    RequestSettings {
        headers: headers.clone(),
        method: method.clone(),
        url: url.clone(),
    }
}

/// Resolve one feature slot from its default files and the user's override.
///
/// Flags and absent overrides yield the defaults untouched. A structured
/// override replaces accepted formats, file count and info modal when it sets
/// them, copies the button, and always produces a complete request.
pub fn parse_config(
    base: &RequestSettings,
    default_files: ResolvedFiles,
    feature: Option<&FeatureOverride>,
    renderer: &dyn MarkdownRenderer,
) -> Result<ResolvedFileConfig, RenderError> {
    let mut resolved = ResolvedFileConfig::from_files(default_files);
    let Some(custom) = feature.and_then(FeatureOverride::custom) else {
        return Ok(resolved);
    };

    if let Some(files) = &custom.files {
        if let Some(info_modal) = &files.info_modal {
            resolved.files.info_modal = Some(info_modal.clone());
            if let Some(text) = non_empty(info_modal.text_markdown.as_ref()) {
                resolved.info_modal_text_markup = Some(renderer.render(text)?);
            }
        }
        if let Some(formats) = non_empty(files.accepted_formats.as_ref()) {
            resolved.files.accepted_formats = formats.clone();
        }
        if let Some(max) = non_zero(files.max_number_of_files) {
            resolved.files.max_number_of_files = Some(max);
        }
    }

    resolved.button = custom.button.clone();
    resolved.request = Some(merge_request(base, custom.request.as_ref()));
    Ok(resolved)
}
