//! Attachkit CLI Binary
//!
//! Command-line interface for resolving chat widget attachment configuration.

use anyhow::Context;
use attachkit::cli::{Cli, RunContext};
use attachkit::config::ConfigLoader;
use attachkit::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);

    if let Some(ref config) = logging_config {
        if let Err(e) = init_logging(Some(config)) {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    }

    info!("attachkit starting");

    let context = match RunContext::new(cli.project.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", attachkit::cli::map_error(&e));
            process::exit(1);
        }
    };

    match run(&context, &cli) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

fn run(context: &RunContext, cli: &Cli) -> anyhow::Result<String> {
    context.execute(&cli.command).with_context(|| {
        format!(
            "attachkit command failed (project {})",
            context.project_root().display()
        )
    })
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
/// Returns `None` when logging is disabled.
fn build_logging_config(cli: &Cli) -> Option<LoggingConfig> {
    if cli.quiet {
        return None;
    }

    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(&cli.project)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    Some(config)
}
