//! CLI parse: clap types for attachkit. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// attachkit - resolve chat widget file-attachment configuration
#[derive(Parser)]
#[command(name = "attachkit")]
#[command(about = "Resolve chat widget file-attachment configuration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project directory holding attachkit.toml
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Configuration file path (overrides layered config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the attachment slots and print them
    Resolve {
        /// Output format (json or toml)
        #[arg(long, default_value = "json")]
        format: String,
        /// Override the configured capture capability (true or false)
        #[arg(long)]
        user_media: Option<bool>,
        /// Include the per-step build record
        #[arg(long)]
        trace: bool,
    },
    /// Validate the effective configuration
    Validate,
    /// Print the effective merged configuration
    ShowConfig {
        /// Output format (json or toml)
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Render info modal markdown with the configured renderer
    Render {
        /// Markdown text
        markdown: String,
    },
}
