//! Config loading facade: assembles the layered sources into a [`WidgetConfig`].

use super::merge::key_spelling::KeySpelling;
use super::merge::merge_policy;
use super::sources::{env, global_file, project_file};
use super::WidgetConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat, Value};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Loads widget configuration from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from defaults, the global file, project files and the environment.
    pub fn load(project_root: &Path) -> Result<WidgetConfig, ConfigError> {
        let mut spelling = KeySpelling::new();
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder, &mut spelling)?;
        let builder = project_file::add_to_builder(builder, project_root, &mut spelling)?;
        let builder = env::add_to_builder(builder);

        let config = Self::finish(builder, &spelling)?;
        debug!(project_root = %project_root.display(), "Loaded widget configuration");
        Ok(config)
    }

    /// Load a single file on top of the defaults. Other sources are ignored.
    pub fn load_from_file(path: &Path) -> Result<WidgetConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let mut spelling = KeySpelling::new();
        spelling.record_file(path)?;
        let builder =
            merge_policy::builder_with_defaults()?.add_source(File::from(path).required(true));
        Self::finish(builder, &spelling)
    }

    /// Load from an in-memory document on top of the defaults.
    pub fn load_from_str(contents: &str, format: FileFormat) -> Result<WidgetConfig, ConfigError> {
        let mut spelling = KeySpelling::new();
        spelling.record_str(contents, format)?;
        let builder =
            merge_policy::builder_with_defaults()?.add_source(File::from_str(contents, format));
        Self::finish(builder, &spelling)
    }

    /// Layer the sources, then give user-written keys back their original case.
    fn finish(
        builder: ConfigBuilder<DefaultState>,
        spelling: &KeySpelling,
    ) -> Result<WidgetConfig, ConfigError> {
        let layered: Value = builder.build()?.try_deserialize()?;
        WidgetConfig::deserialize(spelling.restore(layered))
    }
}
