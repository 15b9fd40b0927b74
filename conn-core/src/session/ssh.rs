//! SSH transport over `russh`.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use russh::client::{self, AuthResult};
use russh::keys::{HashAlg, PublicKey};
use russh::{Channel, ChannelMsg, Disconnect, Pty};
use secrecy::ExposeSecret;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{Instrument, debug, info, warn};

use super::params::{AuthParams, HostKeyPolicy, PtyRequest, TerminalMode};
use super::transport::{Connector, ExitOutcome, LocalStreams, SessionChannel, Transport};
use crate::error::{SessionError, SessionResult};
use crate::tracing::span_names;

/// Connects with password authentication over SSH
#[derive(Debug, Clone, Copy, Default)]
pub struct SshConnector;

impl SshConnector {
    /// Creates a connector
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn open(params: &AuthParams) -> SessionResult<SshTransport> {
        let config = Arc::new(client::Config {
            inactivity_timeout: None,
            ..Default::default()
        });
        let handler = HostKeyCheck {
            server: params.server.clone(),
            policy: params.host_key_policy,
        };

        debug!("Performing SSH handshake");
        let handle = client::connect(config, (params.address.as_str(), params.port), handler)
            .await
            .map_err(|e| SessionError::Connect {
                server: params.server.clone(),
                reason: e.to_string(),
            })?;
        let mut transport = SshTransport { handle };

        debug!(username = %params.username, "Authenticating via password");
        let auth = transport
            .handle
            .authenticate_password(params.username.as_str(), params.password.expose_secret())
            .await
            .map_err(|e| SessionError::Connect {
                server: params.server.clone(),
                reason: e.to_string(),
            })?;

        if !matches!(auth, AuthResult::Success) {
            if let Err(e) = transport.close().await {
                warn!(error = %e, "Failed to close transport");
            }
            return Err(SessionError::AuthenticationFailed {
                server: params.server.clone(),
                user: params.username.clone(),
            });
        }

        info!("Authenticated");
        Ok(transport)
    }
}

#[async_trait]
impl Connector for SshConnector {
    type Transport = SshTransport;

    async fn connect(&self, params: &AuthParams) -> SessionResult<SshTransport> {
        let span = tracing::info_span!(
            span_names::TRANSPORT_OPEN,
            server = %params.server,
            host = %params.address,
            port = params.port
        );

        match tokio::time::timeout(params.timeout, Self::open(params))
            .instrument(span)
            .await
        {
            Ok(result) => result,
            Err(_) => Err(SessionError::Timeout {
                server: params.server.clone(),
                secs: params.timeout.as_secs(),
            }),
        }
    }
}

/// Applies the [`HostKeyPolicy`] during the handshake
struct HostKeyCheck {
    server: String,
    policy: HostKeyPolicy,
}

impl client::Handler for HostKeyCheck {
    type Error = russh::Error;

    fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        let accepted = match self.policy {
            HostKeyPolicy::AcceptAny => {
                warn!(
                    server = %self.server,
                    fingerprint = %server_public_key.fingerprint(HashAlg::Sha256),
                    "Host key accepted without verification"
                );
                true
            }
        };
        async move { Ok(accepted) }
    }
}

/// Authenticated `russh` client connection
pub struct SshTransport {
    handle: client::Handle<HostKeyCheck>,
}

#[async_trait]
impl Transport for SshTransport {
    type Channel = SshChannel;

    async fn open_session(&mut self) -> SessionResult<SshChannel> {
        let channel = self
            .handle
            .channel_open_session()
            .await
            .map_err(|e| SessionError::Channel(e.to_string()))?;

        debug!("Session channel opened");
        Ok(SshChannel {
            channel,
            early: Vec::new(),
            remote_closed: false,
        })
    }

    async fn close(self) -> SessionResult<()> {
        self.handle
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
            .map_err(|e| SessionError::Release {
                what: "transport",
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for SshTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshTransport").finish_non_exhaustive()
    }
}

/// Session channel on an [`SshTransport`]
pub struct SshChannel {
    channel: Channel<client::Msg>,
    /// Stream messages that arrived while a request reply was awaited
    early: Vec<ChannelMsg>,
    remote_closed: bool,
}

impl SshChannel {
    async fn await_reply(&mut self) -> Result<(), String> {
        loop {
            match self.channel.wait().await {
                Some(ChannelMsg::Success) => return Ok(()),
                Some(ChannelMsg::Failure) => return Err("request refused by server".to_string()),
                Some(
                    msg @ (ChannelMsg::Data { .. }
                    | ChannelMsg::ExtendedData { .. }
                    | ChannelMsg::ExitStatus { .. }
                    | ChannelMsg::ExitSignal { .. }
                    | ChannelMsg::Eof
                    | ChannelMsg::Close),
                ) => self.early.push(msg),
                Some(_) => {}
                None => return Err("channel closed".to_string()),
            }
        }
    }

    async fn pump_output<O, E>(&mut self, stdout: &mut O, stderr: &mut E) -> SessionResult<ExitOutcome>
    where
        O: AsyncWrite + Unpin + ?Sized,
        E: AsyncWrite + Unpin + ?Sized,
    {
        let mut exit = None;

        for msg in std::mem::take(&mut self.early) {
            if forward(msg, stdout, stderr, &mut exit).await? {
                self.remote_closed = true;
                return Ok(exit.unwrap_or(ExitOutcome::Closed));
            }
        }

        while let Some(msg) = self.channel.wait().await {
            if forward(msg, stdout, stderr, &mut exit).await? {
                self.remote_closed = true;
                break;
            }
        }

        Ok(exit.unwrap_or(ExitOutcome::Closed))
    }
}

/// Routes one channel message. Returns true once the channel is closed.
async fn forward<O, E>(
    msg: ChannelMsg,
    stdout: &mut O,
    stderr: &mut E,
    exit: &mut Option<ExitOutcome>,
) -> SessionResult<bool>
where
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    match msg {
        ChannelMsg::Data { data } => write_chunk(stdout, &data).await?,
        ChannelMsg::ExtendedData { data, ext: 1 } => write_chunk(stderr, &data).await?,
        ChannelMsg::ExtendedData { ext, .. } => debug!(ext, "Ignoring extended data"),
        ChannelMsg::ExitStatus { exit_status } => {
            debug!(exit_status, "Remote shell exited");
            *exit = Some(ExitOutcome::Exited(exit_status));
        }
        ChannelMsg::ExitSignal {
            signal_name,
            error_message,
            ..
        } => {
            debug!(signal = ?signal_name, "Remote shell killed by signal");
            *exit = Some(ExitOutcome::Signaled {
                signal: format!("{signal_name:?}"),
                message: error_message,
            });
        }
        ChannelMsg::Eof => debug!("Remote sent EOF"),
        ChannelMsg::Close => return Ok(true),
        _ => {}
    }
    Ok(false)
}

async fn write_chunk<W: AsyncWrite + Unpin + ?Sized>(out: &mut W, data: &[u8]) -> SessionResult<()> {
    out.write_all(data)
        .await
        .map_err(|e| SessionError::Relay(e.to_string()))?;
    out.flush()
        .await
        .map_err(|e| SessionError::Relay(e.to_string()))
}

const fn pty_mode(mode: TerminalMode) -> Pty {
    match mode {
        TerminalMode::Echo => Pty::ECHO,
        TerminalMode::InputSpeed => Pty::TTY_OP_ISPEED,
        TerminalMode::OutputSpeed => Pty::TTY_OP_OSPEED,
    }
}

#[async_trait]
impl SessionChannel for SshChannel {
    async fn request_pty(&mut self, request: &PtyRequest) -> SessionResult<()> {
        let modes: Vec<(Pty, u32)> = request
            .modes
            .iter()
            .map(|&(mode, value)| (pty_mode(mode), value))
            .collect();

        self.channel
            .request_pty(
                true,
                &request.term,
                u32::from(request.size.cols),
                u32::from(request.size.rows),
                0,
                0,
                &modes,
            )
            .await
            .map_err(|e| SessionError::PtyRequest(e.to_string()))?;

        self.await_reply().await.map_err(SessionError::PtyRequest)
    }

    async fn start_shell(&mut self) -> SessionResult<()> {
        self.channel
            .request_shell(true)
            .await
            .map_err(|e| SessionError::Shell(e.to_string()))?;

        self.await_reply().await.map_err(SessionError::Shell)
    }

    async fn relay(&mut self, streams: LocalStreams) -> SessionResult<ExitOutcome> {
        let LocalStreams {
            mut stdin,
            mut stdout,
            mut stderr,
        } = streams;

        let mut writer = Box::pin(self.channel.make_writer());
        let input = tokio::spawn(async move {
            let copied = tokio::io::copy(&mut stdin, &mut writer).await;
            let _ = writer.shutdown().await;
            copied
        });

        let outcome = self.pump_output(&mut stdout, &mut stderr).await;
        input.abort();
        outcome
    }

    async fn close(self) -> SessionResult<()> {
        if self.remote_closed {
            debug!("Channel already closed by remote");
            return Ok(());
        }

        self.channel.close().await.map_err(|e| SessionError::Release {
            what: "channel",
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Debug for SshChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SshChannel")
            .field("early", &self.early.len())
            .field("remote_closed", &self.remote_closed)
            .finish_non_exhaustive()
    }
}
