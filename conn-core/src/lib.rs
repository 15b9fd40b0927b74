//! `conn` Core Library
//!
//! This crate provides the core of the `conn` remote-shell launcher: the
//! server directory, terminal state handling and the SSH session lifecycle.
//!
//! # Crate Structure
//!
//! - [`config`] - Server directory loaded from YAML (name → address, user, port)
//! - [`terminal`] - Credential prompt, raw-mode guard, geometry probe
//! - [`session`] - Session manager, SSH transport, stream relay
//! - [`error`] - Error types for every layer
//! - [`tracing`] - Structured logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod session;
pub mod terminal;
pub mod tracing;

pub use config::{
    DEFAULT_SSH_PORT, ServerDirectory, ServerEntry, default_config_path, resolve_config_path,
};
pub use error::{ConfigError, ConfigResult, PromptError, SessionError, SessionResult};
pub use session::{
    AuthParams, ConnectOutcome, Connector, ExitOutcome, HostKeyPolicy, LocalStreams,
    PtyRequest, SessionChannel, SessionManager, SessionState, SshConnector, Transport,
};
pub use terminal::{
    CredentialSource, DEFAULT_TERM_SIZE, ProcessTerminal, RawModeGuard, TermSize,
    TerminalDevice, TerminalPrompt, probe_geometry,
};
