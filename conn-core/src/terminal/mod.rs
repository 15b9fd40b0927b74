//! Local terminal handling
//!
//! Provides:
//! - [`TerminalDevice`] abstraction over the controlling terminal
//! - [`RawModeGuard`] that restores the captured mode exactly once
//! - [`probe_geometry`] with an 80×40 fallback
//! - [`TerminalPrompt`] for no-echo password entry

mod device;
mod geometry;
mod guard;
mod prompt;

pub use device::{ProcessTerminal, TerminalDevice};
pub use geometry::{DEFAULT_TERM_SIZE, TermSize, probe_geometry};
pub use guard::RawModeGuard;
pub use prompt::{CredentialSource, PASSWORD_PROMPT, TerminalPrompt, prompt_secret};
