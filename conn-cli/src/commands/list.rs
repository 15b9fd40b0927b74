//! List servers command.

use std::fmt::Write as _;
use std::io::Write as _;

use conn_core::ServerDirectory;

use crate::error::CliError;

/// List servers command handler
pub fn cmd_list(directory: &ServerDirectory) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(format_server_list(directory).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Renders the server list, one line per server sorted by name
pub fn format_server_list(directory: &ServerDirectory) -> String {
    let mut output = String::from("Available servers:\n");
    for (name, entry) in directory.iter() {
        let _ = writeln!(
            output,
            "- {name} (IP: {}, User: {})",
            entry.address(),
            entry.username()
        );
    }
    output
}
