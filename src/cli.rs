//! CLI domain: parse, route, output and presentation only.
//! No resolution logic here; the route table dispatches to the config and resolver.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_resolved, format_validation_result, OutputFormat};
pub use route::RunContext;
