//! Command handler modules for the CLI.

mod completions;
mod connect;
mod list;

use conn_core::ServerDirectory;

use crate::cli::Commands;
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(directory: &ServerDirectory, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Connect { name } => connect::cmd_connect(directory, &name),
        Commands::List => list::cmd_list(directory),
        Commands::Completion { shell } => completions::cmd_completion(directory, &shell),
    }
}
