//! CLI module for the AAR service
//!
//! Provides command-line interface for:
//! - serve: Load config, validate storage and run the HTTP server
//! - samples: Print the seed records

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{run, run_command, samples, serve, serve_with_config};
pub use errors::{CliError, CliResult};
pub use io::write_json;
