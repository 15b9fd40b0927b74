//! Session lifecycle: lookup, credentials, transport, PTY, shell, relay and
//! unwind.

use std::io::{self, Write};

use tokio::signal::unix::{Signal, SignalKind, signal};
use tracing::{Instrument, debug, info, info_span, warn};

use super::params::{AuthParams, PtyRequest};
use super::state::SessionState;
use super::transport::{Connector, ExitOutcome, LocalStreams, SessionChannel, Transport};
use crate::config::ServerDirectory;
use crate::error::{SessionError, SessionResult};
use crate::terminal::{CredentialSource, RawModeGuard, TerminalDevice, probe_geometry};
use crate::tracing::span_names;

/// Result of a `connect` that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The server name is not in the directory. Nothing was attempted.
    NotFound,
    /// The remote shell exited cleanly and everything was released
    Completed,
}

/// Drives one interactive session at a time.
///
/// Resources are released in a fixed order on every path: the channel, then
/// the transport, then the local terminal mode.
pub struct SessionManager<C, T, P>
where
    C: Connector,
    T: TerminalDevice + Clone,
    P: CredentialSource,
{
    connector: C,
    terminal: T,
    credentials: P,
    console: Box<dyn Write + Send>,
    streams: Option<LocalStreams>,
    state: SessionState,
}

impl<C, T, P> SessionManager<C, T, P>
where
    C: Connector,
    T: TerminalDevice + Clone,
    P: CredentialSource,
{
    /// Creates a manager that prints to stdout and relays the process's
    /// standard streams
    pub fn new(connector: C, terminal: T, credentials: P) -> Self {
        Self {
            connector,
            terminal,
            credentials,
            console: Box::new(io::stdout()),
            streams: None,
            state: SessionState::Idle,
        }
    }

    /// Sends status lines to `console` instead of stdout
    #[must_use]
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Relays `streams` for the next session instead of the process's
    /// standard streams
    #[must_use]
    pub fn with_streams(mut self, streams: LocalStreams) -> Self {
        self.streams = Some(streams);
        self
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Runs an interactive session with the server called `name`.
    ///
    /// A name missing from `directory` is reported on the console and
    /// returns [`ConnectOutcome::NotFound`] without prompting or touching
    /// the network or the terminal.
    pub async fn connect(
        &mut self,
        directory: &ServerDirectory,
        name: &str,
    ) -> SessionResult<ConnectOutcome> {
        let span = info_span!(span_names::SESSION_CONNECT, server = %name);
        self.run(directory, name).instrument(span).await
    }

    async fn run(&mut self, directory: &ServerDirectory, name: &str) -> SessionResult<ConnectOutcome> {
        self.state = SessionState::Idle;

        let Some(entry) = directory.get(name) else {
            info!("Server not found in configuration");
            self.say(&format!("Server {name} not found in configuration."));
            return Ok(ConnectOutcome::NotFound);
        };
        self.advance(SessionState::Resolved);

        let password = match self.credentials.acquire() {
            Ok(password) => password,
            Err(e) => return Err(self.fail(e.into())),
        };
        let params = AuthParams::new(name, entry, password);

        let result = self.establish(&params).await;
        match result {
            Ok(()) => {
                self.advance(SessionState::Closed);
                info!("Session closed");
                Ok(ConnectOutcome::Completed)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn establish(&mut self, params: &AuthParams) -> SessionResult<()> {
        let mut transport = self.connector.connect(params).await?;
        self.advance(SessionState::Authenticated);
        self.say(&format!("Connected to {} ({})", params.server, params.address));

        let mut channel = match transport.open_session().await {
            Ok(channel) => channel,
            Err(e) => {
                release_transport(transport).await;
                return Err(e);
            }
        };
        self.advance(SessionState::ChannelOpen);

        let mut signals = match TerminationSignals::register() {
            Ok(signals) => signals,
            Err(e) => {
                release_channel(channel).await;
                release_transport(transport).await;
                return Err(SessionError::Signals(e));
            }
        };

        let guard = match RawModeGuard::enter(self.terminal.clone()) {
            Ok(guard) => guard,
            Err(e) => {
                release_channel(channel).await;
                release_transport(transport).await;
                return Err(SessionError::Terminal(e));
            }
        };
        self.advance(SessionState::RawMode);

        let result = tokio::select! {
            result = self.drive(&mut channel) => result,
            name = signals.recv() => {
                info!(signal = name, "Termination signal received");
                Err(SessionError::Interrupted(name))
            }
        };

        release_channel(channel).await;
        release_transport(transport).await;
        guard.exit();

        result
    }

    async fn drive<Ch: SessionChannel>(&mut self, channel: &mut Ch) -> SessionResult<()> {
        let size = probe_geometry(&self.terminal);
        debug!(cols = size.cols, rows = size.rows, "Requesting pseudo-terminal");
        channel.request_pty(&PtyRequest::interactive(size)).await?;
        self.advance(SessionState::PtyRequested);

        let streams = self.streams.take().unwrap_or_else(LocalStreams::process);

        channel.start_shell().await?;
        self.advance(SessionState::ShellRunning);

        let outcome = channel
            .relay(streams)
            .instrument(info_span!(span_names::SESSION_RELAY))
            .await?;

        match outcome {
            ExitOutcome::Exited(0) | ExitOutcome::Closed => Ok(()),
            ExitOutcome::Exited(code) => Err(SessionError::RemoteExit(code)),
            ExitOutcome::Signaled { signal, message } => {
                Err(SessionError::RemoteSignal { signal, message })
            }
        }
    }

    fn advance(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid session transition {} -> {next}",
            self.state
        );
        debug!(from = %self.state, state = %next, "Session state changed");
        self.state = next;
    }

    fn fail(&mut self, error: SessionError) -> SessionError {
        warn!(error = %error, state = %self.state, "Session failed");
        self.advance(SessionState::Failed);
        error
    }

    fn say(&mut self, line: &str) {
        if let Err(e) = writeln!(self.console, "{line}").and_then(|()| self.console.flush()) {
            warn!(error = %e, "Failed to write to console");
        }
    }
}

impl<C, T, P> std::fmt::Debug for SessionManager<C, T, P>
where
    C: Connector,
    T: TerminalDevice + Clone,
    P: CredentialSource,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// SIGTERM and SIGHUP listeners, installed before the terminal goes raw
struct TerminationSignals {
    terminate: Signal,
    hangup: Signal,
}

impl TerminationSignals {
    fn register() -> io::Result<Self> {
        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            hangup: signal(SignalKind::hangup())?,
        })
    }

    /// Waits for either signal and returns its name
    async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.terminate.recv() => "SIGTERM",
            _ = self.hangup.recv() => "SIGHUP",
        }
    }
}

async fn release_channel<Ch: SessionChannel>(channel: Ch) {
    match channel.close().await {
        Ok(()) => debug!("Channel released"),
        Err(e) => warn!(error = %e, "Failed to close channel"),
    }
}

async fn release_transport<Tr: Transport>(transport: Tr) {
    match transport.close().await {
        Ok(()) => debug!("Transport released"),
        Err(e) => warn!(error = %e, "Failed to close transport"),
    }
}
