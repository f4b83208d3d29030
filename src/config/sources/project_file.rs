//! Project config file source: attachkit.toml and attachkit.{env}.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

use crate::config::merge::key_spelling::KeySpelling;

/// Add project config files to builder.
/// Precedence: attachkit.toml (base) then attachkit.{ATTACHKIT_ENV}.toml (env-specific).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_root: &Path,
    spelling: &mut KeySpelling,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let env_name = std::env::var("ATTACHKIT_ENV").unwrap_or_else(|_| "development".to_string());

    let mut builder = builder;

    let base_config_path = project_root.join("attachkit.toml");
    if base_config_path.exists() {
        spelling.record_file(&base_config_path)?;
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    let env_config_path = project_root.join(format!("attachkit.{}.toml", env_name));
    if env_config_path.exists() {
        spelling.record_file(&env_config_path)?;
        builder = builder.add_source(File::from(env_config_path).required(false));
    }

    Ok(builder)
}
