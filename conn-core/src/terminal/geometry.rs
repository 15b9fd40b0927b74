//! Terminal geometry probe.

use tracing::warn;

use super::device::TerminalDevice;

/// Terminal size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    /// Number of columns
    pub cols: u16,
    /// Number of rows
    pub rows: u16,
}

/// Size used when the terminal cannot be queried
pub const DEFAULT_TERM_SIZE: TermSize = TermSize { cols: 80, rows: 40 };

/// Queries the terminal size, falling back to [`DEFAULT_TERM_SIZE`].
///
/// A zero dimension counts as a failed probe.
pub fn probe_geometry<T: TerminalDevice>(terminal: &T) -> TermSize {
    match terminal.size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => TermSize { cols, rows },
        Ok((cols, rows)) => {
            warn!(cols, rows, "Terminal reported an empty size, using default");
            DEFAULT_TERM_SIZE
        }
        Err(e) => {
            warn!(error = %e, "Failed to get terminal size, using default");
            DEFAULT_TERM_SIZE
        }
    }
}
