//! Error types for `conn`
//!
//! Each layer has its own error enum with a matching `*Result` alias.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the server directory
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to load config file {}: {source}", .path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for a server directory
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        /// Path that was parsed
        path: PathBuf,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// A server entry is missing a required value
    #[error("Invalid entry '{name}': {reason}")]
    InvalidEntry {
        /// Server name of the offending entry
        name: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by the credential prompt
#[derive(Debug, Error)]
pub enum PromptError {
    /// The terminal could not be switched to no-echo mode or the read failed
    #[error("Failed to read password: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors raised during the session lifecycle
#[derive(Debug, Error)]
pub enum SessionError {
    /// Credential acquisition failed
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// TCP connection or SSH handshake failed
    #[error("Failed to connect to server {server}: {reason}")]
    Connect {
        /// Server name as configured
        server: String,
        /// Cause reported by the transport
        reason: String,
    },

    /// Connection and authentication did not finish within the timeout
    #[error("Failed to connect to server {server}: timed out after {secs}s")]
    Timeout {
        /// Server name as configured
        server: String,
        /// Timeout in seconds
        secs: u64,
    },

    /// The server rejected the credentials
    #[error("Authentication failed for {user}@{server}")]
    AuthenticationFailed {
        /// Server name as configured
        server: String,
        /// Username used for the attempt
        user: String,
    },

    /// Opening the session channel failed
    #[error("Failed to create SSH session: {0}")]
    Channel(String),

    /// Switching the local terminal to raw mode failed
    #[error("Failed to set terminal to raw mode: {0}")]
    Terminal(#[source] std::io::Error),

    /// The remote side refused the pseudo-terminal request
    #[error("Failed to set terminal mode: {0}")]
    PtyRequest(String),

    /// The remote side refused to start a shell
    #[error("Failed to start shell: {0}")]
    Shell(String),

    /// Relaying bytes between local and remote streams failed
    #[error("Session ended with error: {0}")]
    Relay(String),

    /// The remote shell exited with a non-zero status
    #[error("Session ended with error: remote command exited with status {0}")]
    RemoteExit(u32),

    /// The remote shell was terminated by a signal
    #[error(
        "Session ended with error: remote command killed by signal {}{}",
        .signal,
        format_message(.message)
    )]
    RemoteSignal {
        /// Signal name reported by the server
        signal: String,
        /// Optional error message sent along with the signal
        message: String,
    },

    /// Closing the channel or disconnecting the transport failed
    #[error("Failed to close {what}: {reason}")]
    Release {
        /// `channel` or `transport`
        what: &'static str,
        /// Cause reported by the transport
        reason: String,
    },

    /// SIGTERM or SIGHUP listeners could not be installed
    #[error("Failed to install signal handlers: {0}")]
    Signals(#[source] std::io::Error),

    /// The local process received a termination signal
    #[error("Session interrupted by {0}")]
    Interrupted(&'static str),
}

fn format_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" ({message})")
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
