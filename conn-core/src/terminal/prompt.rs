//! No-echo password prompt.

use std::io::{self, Write};

use crossterm::tty::IsTty;
use secrecy::SecretString;

use crate::error::PromptError;

/// Prompt written before the password is read
pub const PASSWORD_PROMPT: &str = "Enter password: ";

/// Source of the password used for authentication
pub trait CredentialSource {
    /// Acquires the secret. There is no retry; an error aborts the connect.
    fn acquire(&self) -> Result<SecretString, PromptError>;
}

/// Prompts on stdout and reads from the controlling terminal without echo
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl CredentialSource for TerminalPrompt {
    fn acquire(&self) -> Result<SecretString, PromptError> {
        let mut stdout = io::stdout().lock();
        // rpassword reads /dev/tty with ECHONL set, so Enter is echoed there
        let newline_echoed = stdout.is_tty();
        prompt_secret(&mut stdout, newline_echoed, rpassword::read_password)
    }
}

/// Writes [`PASSWORD_PROMPT`] and reads the secret with `read`.
///
/// Unless `newline_echoed` says the read already moved the cursor off the
/// prompt line, a newline is written to `out` afterwards.
pub fn prompt_secret<W, F>(
    out: &mut W,
    newline_echoed: bool,
    read: F,
) -> Result<SecretString, PromptError>
where
    W: Write,
    F: FnOnce() -> io::Result<String>,
{
    out.write_all(PASSWORD_PROMPT.as_bytes())?;
    out.flush()?;

    let secret = read()?;

    if !newline_echoed {
        out.write_all(b"\n")?;
        out.flush()?;
    }

    Ok(SecretString::from(secret))
}
