//! Session lifecycle states.

use std::fmt;

/// Lifecycle of one `connect` invocation.
///
/// `Idle → Resolved → Authenticated → ChannelOpen → RawMode → PtyRequested →
/// ShellRunning → {Closed | Failed}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing started
    #[default]
    Idle,
    /// Server name found in the directory
    Resolved,
    /// Transport open and authenticated
    Authenticated,
    /// Session channel open
    ChannelOpen,
    /// Local terminal in raw mode
    RawMode,
    /// Remote pseudo-terminal granted
    PtyRequested,
    /// Remote shell started, streams relayed
    ShellRunning,
    /// Shell exited and everything was released
    Closed,
    /// A step failed and everything acquired so far was released
    Failed,
}

impl SessionState {
    /// Returns true for `Closed` and `Failed`
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Failed)
    }

    /// Returns true if `next` is the forward step from `self`, or a move to
    /// `Failed` from a non-terminal state
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Resolved)
                | (Self::Resolved, Self::Authenticated)
                | (Self::Authenticated, Self::ChannelOpen)
                | (Self::ChannelOpen, Self::RawMode)
                | (Self::RawMode, Self::PtyRequested)
                | (Self::PtyRequested, Self::ShellRunning)
                | (Self::ShellRunning, Self::Closed)
        ) || (matches!(next, Self::Failed) && !self.is_terminal())
    }

    /// Short lowercase name for logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Resolved => "resolved",
            Self::Authenticated => "authenticated",
            Self::ChannelOpen => "channel_open",
            Self::RawMode => "raw_mode",
            Self::PtyRequested => "pty_requested",
            Self::ShellRunning => "shell_running",
            Self::Closed => "closed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
