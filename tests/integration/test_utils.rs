//! Shared fixtures for integration tests

use attachkit::types::{
    FeatureOverride, FileAttachments, FilesServiceConfig, Headers, RequestSettings,
};
use attachkit::RenderError;
use std::sync::{Arc, Mutex};

pub fn base_request() -> RequestSettings {
    RequestSettings {
        method: "GET".to_string(),
        url: "/x".to_string(),
        headers: Headers::new(),
    }
}

pub fn with_files(files: FileAttachments) -> FeatureOverride {
    FeatureOverride::Custom(FilesServiceConfig {
        files: Some(files),
        ..FilesServiceConfig::default()
    })
}

/// Renderer that records every call and wraps its input in a marker
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingRenderer {
    pub fn renderer(&self) -> impl Fn(&str) -> Result<String, RenderError> + Send + Sync {
        let calls = Arc::clone(&self.calls);
        move |markdown: &str| {
            calls.lock().unwrap().push(markdown.to_string());
            Ok(format!("<rendered>{}</rendered>", markdown))
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}
