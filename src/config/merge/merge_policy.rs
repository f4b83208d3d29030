//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the global file, then project
//! files, then environment variables.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("request.method", "POST")?
        .set_default("request.url", "")?
        .set_default("resolution.fallback", "override_absent")?
        .set_default("markdown.allow_html", false)?
        .set_default("markdown.tables", true)?
        .set_default("markdown.strikethrough", true)
}
