//! `conn` - open an interactive SSH shell on a server from a YAML directory
//!
//! Provides commands for connecting to a configured server, listing the
//! configured servers and generating shell completion scripts.

mod cli;
mod commands;
mod error;
mod util;

use std::path::Path;

use clap::Parser;
use cli::{Cli, Commands};
use conn_core::ServerDirectory;
use conn_core::tracing::init_tracing;

use crate::error::CliError;

fn main() {
    let Cli {
        config,
        verbose,
        quiet,
        log_file,
        command,
    } = Cli::parse();

    let env = std::env::var(util::LOG_ENV).ok();
    let log_config = util::tracing_config(verbose, quiet, log_file.as_deref(), env.as_deref());
    if let Err(e) = init_tracing(&log_config)
        && !quiet
    {
        eprintln!("Warning: {e}");
    }

    if let Err(e) = run(config.as_deref(), command) {
        if !quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}

fn run(config_path: Option<&Path>, command: Commands) -> Result<(), CliError> {
    let path = conn_core::default_config_path(config_path);
    tracing::debug!(path = %path.display(), "Using configuration file");

    let directory = ServerDirectory::load(&path)?;
    commands::dispatch(&directory, command)
}
