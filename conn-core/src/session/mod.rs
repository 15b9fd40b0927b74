//! Remote session lifecycle.
//!
//! [`SessionManager`] drives one interactive shell through the
//! [`Connector`] / [`Transport`] / [`SessionChannel`] seams;
//! [`SshConnector`] implements them over `russh`.

mod manager;
mod params;
mod ssh;
mod state;
mod transport;

pub use manager::{ConnectOutcome, SessionManager};
pub use params::{
    AuthParams, CONNECT_TIMEOUT, HostKeyPolicy, PtyRequest, TERM_TYPE, TERMINAL_SPEED, TerminalMode,
};
pub use ssh::{SshChannel, SshConnector, SshTransport};
pub use state::SessionState;
pub use transport::{Connector, ExitOutcome, LocalStreams, SessionChannel, Transport};
