//! Environment source: ATTACHKIT__SECTION__KEY=value

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "ATTACHKIT";

/// Add environment overrides, e.g. `ATTACHKIT__CAPABILITIES__USER_MEDIA=true`
/// or `ATTACHKIT__ASSISTANT__MIXED_FILES=true`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
