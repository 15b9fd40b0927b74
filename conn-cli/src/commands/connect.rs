//! Connect command.

use std::time::Duration;

use conn_core::{
    ConnectOutcome, ProcessTerminal, ServerDirectory, SessionManager, SshConnector, TerminalPrompt,
};

use crate::error::CliError;

/// Grace period for the runtime after the session ends. The stdin pump is
/// parked in a blocking read that only returns on the next keystroke.
const RUNTIME_SHUTDOWN: Duration = Duration::from_millis(100);

/// Connect command handler
pub fn cmd_connect(directory: &ServerDirectory, name: &str) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut manager =
        SessionManager::new(SshConnector::new(), ProcessTerminal::new(), TerminalPrompt);
    let result = runtime.block_on(manager.connect(directory, name));
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN);

    match result? {
        ConnectOutcome::NotFound => {
            tracing::debug!(server = %name, "Nothing to connect to");
            Ok(())
        }
        ConnectOutcome::Completed => Ok(()),
    }
}
