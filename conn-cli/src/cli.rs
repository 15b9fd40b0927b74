//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Binary name used in help output and completion scripts
pub const BIN_NAME: &str = "conn";

/// Open interactive SSH shells on servers listed in a YAML directory
#[derive(Parser)]
#[command(name = "conn")]
#[command(author, version, about = "Open an interactive shell on a configured server")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the server configuration file
    #[arg(short, long, global = true, env = "CONN_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress logs and error messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Connect to a server by name
    #[command(about = "Open an interactive shell on a configured server")]
    Connect {
        /// Server name as configured
        #[arg(value_name = "SERVER")]
        name: String,
    },

    /// List configured servers
    #[command(about = "List all servers in the configuration")]
    List,

    /// Generate a shell completion script
    #[command(about = "Print a completion script for bash or zsh")]
    Completion {
        /// Target shell (bash or zsh)
        shell: String,
    },
}
