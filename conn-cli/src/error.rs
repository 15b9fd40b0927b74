//! CLI error types and exit codes.

use conn_core::{ConfigError, SessionError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, terminal or IO failures
    pub const GENERAL_ERROR: i32 = 1;
    /// Connection failure - the server could not be reached or refused the
    /// session
    pub const CONNECTION_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport, authentication or remote session error
    #[error("{0}")]
    Connection(String),

    /// Local terminal or credential prompt error
    #[error("{0}")]
    Terminal(String),

    /// The remote shell exited with a non-zero status
    #[error("{message}")]
    RemoteExit {
        /// Remote exit status
        code: u32,
        /// Full error message
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::RemoteExit(code) => Self::RemoteExit {
                code,
                message: err.to_string(),
            },
            SessionError::Prompt(_) | SessionError::Terminal(_) | SessionError::Signals(_) => {
                Self::Terminal(err.to_string())
            }
            _ => Self::Connection(err.to_string()),
        }
    }
}

impl CliError {
    /// Returns the exit code for this error.
    ///
    /// Exit codes:
    /// - 1: General error (configuration, terminal, IO)
    /// - 2: Connection failure
    /// - the remote status itself when the remote shell exited non-zero
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Connection(_) => exit_codes::CONNECTION_FAILURE,
            Self::RemoteExit { code, .. } => i32::try_from(*code)
                .ok()
                .filter(|code| (1..=255).contains(code))
                .unwrap_or(exit_codes::GENERAL_ERROR),
            Self::Config(_) | Self::Terminal(_) | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
