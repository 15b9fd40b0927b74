//! Terminal device abstraction and the process implementation.

use std::io;

use crossterm::tty::IsTty;
use nix::sys::termios::{self, SetArg, Termios};

/// Operations the session needs from the local terminal.
///
/// `Snapshot` is an opaque capture of the line-discipline mode; only
/// [`RawModeGuard`](super::RawModeGuard) holds one.
pub trait TerminalDevice {
    /// Captured terminal mode
    type Snapshot;

    /// Captures the current mode
    fn capture(&self) -> io::Result<Self::Snapshot>;

    /// Switches to raw mode, derived from the captured mode
    fn enter_raw(&self, snapshot: &Self::Snapshot) -> io::Result<()>;

    /// Puts the captured mode back
    fn restore(&self, snapshot: &Self::Snapshot) -> io::Result<()>;

    /// Current `(columns, rows)`
    fn size(&self) -> io::Result<(u16, u16)>;
}

/// The terminal attached to this process: modes on stdin, size of stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTerminal;

impl ProcessTerminal {
    /// Creates a handle to the process terminal
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TerminalDevice for ProcessTerminal {
    type Snapshot = Termios;

    fn capture(&self) -> io::Result<Termios> {
        termios::tcgetattr(io::stdin()).map_err(io::Error::from)
    }

    fn enter_raw(&self, snapshot: &Termios) -> io::Result<()> {
        let mut raw = snapshot.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &raw).map_err(io::Error::from)
    }

    fn restore(&self, snapshot: &Termios) -> io::Result<()> {
        termios::tcsetattr(io::stdin(), SetArg::TCSANOW, snapshot).map_err(io::Error::from)
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        stream_size(&io::stdout())
    }
}

/// Size of the terminal behind `stream`.
///
/// `crossterm` asks the controlling tty and falls back to `tput`, which
/// answers even when `stream` is a pipe or a file. Anything that is not a
/// terminal is an error here.
fn stream_size<S: IsTty>(stream: &S) -> io::Result<(u16, u16)> {
    if !stream.is_tty() {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "output is not a terminal",
        ));
    }
    crossterm::terminal::size()
}
