//! Line-oriented terminal I/O.

use std::fmt::Display;
use std::io::{self, BufRead, ErrorKind, Write};

use minimail_core::{AccountError, LoginPrompt};

use crate::render;

/// Prompts and output over any line reader and writer.
///
/// Production uses locked stdin/stdout; tests script the input.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `label` and reads one trimmed line.
    ///
    /// End of input is reported as [`ErrorKind::UnexpectedEof`].
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    /// Prints one line.
    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Prints a banner with a centred title.
    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        self.say(render::banner(title))
    }

    /// Consumes the console and returns the output stream.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> LoginPrompt for Console<R, W> {
    fn username(&mut self) -> minimail_core::Result<String> {
        Ok(self.prompt("Enter your username: ")?)
    }

    fn password(&mut self) -> minimail_core::Result<String> {
        Ok(self.prompt("Enter your password: ")?)
    }

    fn rejected(&mut self, reason: &AccountError) -> minimail_core::Result<()> {
        Ok(self.say(format_args!("{reason}. Try again."))?)
    }
}

/// Returns true if `err` was caused by stdin reaching end of input.
pub fn input_closed(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == ErrorKind::UnexpectedEof)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn prompt_trims_and_echoes_label() {
        let mut c = console("  hello \nnext\n");
        assert_eq!(c.prompt("Name: ").unwrap(), "hello");
        assert_eq!(c.prompt("Again: ").unwrap(), "next");
        assert_eq!(String::from_utf8(c.into_output()).unwrap(), "Name: Again: ");
    }

    #[test]
    fn prompt_at_eof() {
        let mut c = console("");
        let err = c.prompt("> ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert!(input_closed(&anyhow::Error::from(err)));
    }

    #[test]
    fn closed_input_through_core_error() {
        let io = io::Error::new(ErrorKind::UnexpectedEof, "input closed");
        let err = anyhow::Error::from(minimail_core::Error::from(io));
        assert!(input_closed(&err));
    }

    #[test]
    fn other_errors_are_not_closed_input() {
        let err = anyhow::anyhow!("disk full");
        assert!(!input_closed(&err));
    }

    #[test]
    fn rejection_message() {
        let mut c = console("");
        c.rejected(&AccountError::WrongPassword).unwrap();
        assert_eq!(
            String::from_utf8(c.into_output()).unwrap(),
            "Incorrect password. Try again.\n"
        );
    }
}
