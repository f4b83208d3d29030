//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_resolved, format_validation_result, serialize, OutputFormat};
use crate::config::{ConfigLoader, WidgetConfig};
use crate::error::AttachError;
use crate::markdown::{CmarkRenderer, MarkdownRenderer};
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: the effective configuration and where it came from.
pub struct RunContext {
    config: WidgetConfig,
    project_root: PathBuf,
}

impl RunContext {
    /// Create run context from project root and optional config path. Uses ConfigLoader only.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, AttachError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&project_root)?,
        };
        Ok(Self::from_config(project_root, config))
    }

    pub fn from_config(project_root: PathBuf, config: WidgetConfig) -> Self {
        Self {
            config,
            project_root,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Execute a command and return its stdout text
    pub fn execute(&self, command: &Commands) -> Result<String, AttachError> {
        match command {
            Commands::Resolve {
                format,
                user_media,
                trace,
            } => self.handle_resolve(format.parse()?, *user_media, *trace),
            Commands::Validate => self.handle_validate(),
            Commands::ShowConfig { format } => serialize(&self.config, format.parse()?),
            Commands::Render { markdown } => {
                let renderer = CmarkRenderer::new(self.config.markdown.clone());
                Ok(renderer.render(markdown)?)
            }
        }
    }

    fn handle_resolve(
        &self,
        format: OutputFormat,
        user_media: Option<bool>,
        trace: bool,
    ) -> Result<String, AttachError> {
        let mut config = self.config.clone();
        if user_media.is_some() {
            config.capabilities.user_media = user_media;
        }

        let (resolved, records) = config.resolve_traced()?;
        info!(
            project_root = %self.project_root.display(),
            slots = resolved.populated_slots().len(),
            "Resolve command finished"
        );
        let records = trace.then_some(records.as_slice());
        format_resolved(&resolved, records, format)
    }

    fn handle_validate(&self) -> Result<String, AttachError> {
        let result = self.config.validate();
        let text = format_validation_result(&result);
        match result {
            Ok(()) => Ok(text),
            Err(_) => Err(AttachError::ConfigError(text)),
        }
    }
}
