//! Transport seams between the session manager and the SSH implementation.
//!
//! The manager only talks to these traits; [`SshConnector`](super::SshConnector)
//! is the `russh` implementation and tests drive the manager with fakes.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

use super::params::{AuthParams, PtyRequest};
use crate::error::SessionResult;

/// How the remote shell ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The shell reported an exit status
    Exited(u32),
    /// The shell was killed by a signal
    Signaled {
        /// Signal name
        signal: String,
        /// Error message sent with the signal, possibly empty
        message: String,
    },
    /// The channel closed without an exit status
    Closed,
}

/// Local standard streams handed to the relay
pub struct LocalStreams {
    /// Bytes typed locally, sent to the remote stdin
    pub stdin: Box<dyn AsyncRead + Send + Unpin>,
    /// Receives remote stdout
    pub stdout: Box<dyn AsyncWrite + Send + Unpin>,
    /// Receives remote stderr
    pub stderr: Box<dyn AsyncWrite + Send + Unpin>,
}

impl LocalStreams {
    /// The process's own stdin, stdout and stderr
    #[must_use]
    pub fn process() -> Self {
        Self {
            stdin: Box::new(tokio::io::stdin()),
            stdout: Box::new(tokio::io::stdout()),
            stderr: Box::new(tokio::io::stderr()),
        }
    }
}

impl std::fmt::Debug for LocalStreams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStreams").finish_non_exhaustive()
    }
}

/// Opens authenticated transports
#[async_trait]
pub trait Connector: Send + Sync {
    /// Transport produced by this connector
    type Transport: Transport;

    /// Connects and authenticates within `params.timeout`
    async fn connect(&self, params: &AuthParams) -> SessionResult<Self::Transport>;
}

/// An authenticated transport connection
#[async_trait]
pub trait Transport: Send {
    /// Session channel type
    type Channel: SessionChannel;

    /// Opens a new session channel
    async fn open_session(&mut self) -> SessionResult<Self::Channel>;

    /// Disconnects the transport
    async fn close(self) -> SessionResult<()>;
}

/// One session channel on a transport
#[async_trait]
pub trait SessionChannel: Send {
    /// Requests a remote pseudo-terminal and waits for the reply
    async fn request_pty(&mut self, request: &PtyRequest) -> SessionResult<()>;

    /// Starts the remote login shell and waits for the reply
    async fn start_shell(&mut self) -> SessionResult<()>;

    /// Relays bytes between `streams` and the channel until the remote
    /// session ends
    async fn relay(&mut self, streams: LocalStreams) -> SessionResult<ExitOutcome>;

    /// Closes the channel
    async fn close(self) -> SessionResult<()>;
}
