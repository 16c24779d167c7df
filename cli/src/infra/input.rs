//! Line input from a terminal or pipe: implements `InputSource`.
//!
//! Lines are read on a dedicated thread and handed over a channel, so a
//! pending read can be abandoned (on Ctrl-C) without holding up shutdown.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::application::ports::InputSource;

/// Reads lines from a background reader, writing prompts to `prompt_out`.
pub struct LineInput<W> {
    lines: mpsc::UnboundedReceiver<std::io::Result<String>>,
    prompt_out: W,
}

impl LineInput<std::io::Stdout> {
    /// Prompts on stdout, answers from stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<W: Write> LineInput<W> {
    pub fn new<R>(reader: R, prompt_out: W) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, lines) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Self { lines, prompt_out }
    }
}

impl<W: Write> InputSource for LineInput<W> {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.prompt_out, "{prompt}").context("writing prompt")?;
        self.prompt_out.flush().context("writing prompt")?;

        match self.lines.recv().await {
            Some(line) => Ok(Some(line.context("reading input")?.trim().to_string())),
            None => {
                // Keep the next output off the prompt line.
                writeln!(self.prompt_out).ok();
                Ok(None)
            }
        }
    }
}

/// Resolves when the user presses Ctrl-C.
///
/// Never resolves if the handler cannot be installed; the default signal
/// behaviour then still applies.
pub async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_trimmed_lines_until_eof() {
        let mut input = LineInput::new(&b"  1 \r\nfull lesson\n"[..], Vec::new());
        assert_eq!(input.read_line("> ").await.unwrap().as_deref(), Some("1"));
        assert_eq!(input.read_line("> ").await.unwrap().as_deref(), Some("full lesson"));
        assert_eq!(input.read_line("> ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn blank_line_is_empty_not_eof() {
        let mut input = LineInput::new(&b"\n"[..], Vec::new());
        assert_eq!(input.read_line("> ").await.unwrap().as_deref(), Some(""));
    }

    #[tokio::test]
    async fn prompt_is_written_before_reading() {
        let mut input = LineInput::new(&b"x\n"[..], Vec::new());
        input.read_line("Your choice > ").await.unwrap();
        assert_eq!(input.prompt_out, b"Your choice > ");
    }

    #[tokio::test]
    async fn eof_moves_off_the_prompt_line() {
        let mut input = LineInput::new(&b""[..], Vec::new());
        assert_eq!(input.read_line("> ").await.unwrap(), None);
        assert_eq!(input.prompt_out, b"> \n");
    }
}
