//! Shell completion generation.

use std::io::Write;

use clap::CommandFactory;
use clap::builder::{PossibleValue, PossibleValuesParser};
use clap_complete::{Shell, generate};
use conn_core::ServerDirectory;

use crate::cli::{BIN_NAME, Cli};
use crate::error::CliError;

/// Generate a completion script and write it to stdout.
pub fn cmd_completion(directory: &ServerDirectory, shell: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    write_completion(directory, shell, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Writes the script for `shell`, or a notice for unsupported shells
pub fn write_completion<W: Write>(
    directory: &ServerDirectory,
    shell: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let shell = match shell {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        _ => {
            writeln!(out, "Only bash and zsh are supported.")?;
            return Ok(());
        }
    };

    let mut cmd = completion_command(directory);
    generate(shell, &mut cmd, BIN_NAME, out);
    Ok(())
}

/// The CLI definition with configured server names as `connect` candidates
fn completion_command(directory: &ServerDirectory) -> clap::Command {
    let cmd = Cli::command();
    if directory.is_empty() {
        return cmd;
    }

    let servers: Vec<PossibleValue> = directory
        .names()
        .map(|name| PossibleValue::new(name.to_string()))
        .collect();
    cmd.mut_subcommand("connect", |sub| {
        sub.mut_arg("name", |arg| {
            arg.value_parser(PossibleValuesParser::new(servers))
        })
    })
}
