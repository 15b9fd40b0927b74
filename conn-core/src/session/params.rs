//! Authentication and pseudo-terminal request parameters.

use std::time::Duration;

use secrecy::SecretString;

use crate::config::ServerEntry;
use crate::terminal::TermSize;

/// Upper bound for TCP connect, handshake and authentication
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Terminal type announced to the remote side
pub const TERM_TYPE: &str = "xterm-256color";

/// Line speed reported for both directions, in baud
pub const TERMINAL_SPEED: u32 = 14_400;

/// How the remote host key is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostKeyPolicy {
    /// Any host key is accepted.
    ///
    /// This is a known gap: the remote identity is never verified. The key
    /// fingerprint is logged at warn level on every connection.
    #[default]
    AcceptAny,
}

/// Everything needed to open and authenticate a transport
#[derive(Debug)]
pub struct AuthParams {
    /// Server name as configured, used in messages
    pub server: String,
    /// Host name or IP address
    pub address: String,
    /// Effective port
    pub port: u16,
    /// Login name
    pub username: String,
    /// Password for password authentication
    pub password: SecretString,
    /// Bound for connect + authentication
    pub timeout: Duration,
    /// Host key policy
    pub host_key_policy: HostKeyPolicy,
}

impl AuthParams {
    /// Builds parameters for `entry` with the fixed timeout and policy
    #[must_use]
    pub fn new(server: &str, entry: &ServerEntry, password: SecretString) -> Self {
        Self {
            server: server.to_string(),
            address: entry.address().to_string(),
            port: entry.port(),
            username: entry.username().to_string(),
            password,
            timeout: CONNECT_TIMEOUT,
            host_key_policy: HostKeyPolicy::AcceptAny,
        }
    }
}

/// Terminal mode opcodes sent with the PTY request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    /// Echo input characters
    Echo,
    /// Input baud rate
    InputSpeed,
    /// Output baud rate
    OutputSpeed,
}

/// Pseudo-terminal request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtyRequest {
    /// Terminal type, e.g. `xterm-256color`
    pub term: String,
    /// Size in cells
    pub size: TermSize,
    /// Mode opcodes and values
    pub modes: Vec<(TerminalMode, u32)>,
}

impl PtyRequest {
    /// Standard interactive request for the given size
    #[must_use]
    pub fn interactive(size: TermSize) -> Self {
        Self {
            term: TERM_TYPE.to_string(),
            size,
            modes: vec![
                (TerminalMode::Echo, 1),
                (TerminalMode::InputSpeed, TERMINAL_SPEED),
                (TerminalMode::OutputSpeed, TERMINAL_SPEED),
            ],
        }
    }
}
