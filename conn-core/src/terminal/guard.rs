//! Raw-mode guard for the local terminal.

use std::io;

use tracing::{debug, warn};

use super::device::TerminalDevice;

/// Holds the local terminal in raw mode until [`exit`](Self::exit) or drop.
///
/// The snapshot captured on entry is restored exactly once: by `exit()` on
/// the normal unwind path, or by `Drop` on panic or cancellation.
pub struct RawModeGuard<T: TerminalDevice> {
    terminal: T,
    snapshot: Option<T::Snapshot>,
}

impl<T: TerminalDevice> RawModeGuard<T> {
    /// Captures the current mode and switches the terminal to raw mode.
    ///
    /// Nothing is held if this fails: a capture error leaves the terminal
    /// untouched, and a failed switch is rolled back to the capture.
    pub fn enter(terminal: T) -> io::Result<Self> {
        let snapshot = terminal.capture()?;

        if let Err(e) = terminal.enter_raw(&snapshot) {
            let _ = terminal.restore(&snapshot);
            return Err(e);
        }

        debug!("Entered raw terminal mode");
        Ok(Self {
            terminal,
            snapshot: Some(snapshot),
        })
    }

    /// Returns true until the captured mode has been restored
    pub const fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Restores the captured mode. Failure is logged, never returned.
    pub fn exit(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };

        match self.terminal.restore(&snapshot) {
            Ok(()) => debug!("Restored terminal settings"),
            Err(e) => warn!(error = %e, "Failed to restore terminal state"),
        }
    }
}

impl<T: TerminalDevice> Drop for RawModeGuard<T> {
    fn drop(&mut self) {
        self.restore();
    }
}
