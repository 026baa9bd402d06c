//! Line-oriented terminal I/O with colored status lines.

use std::io;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Green.
    Success,
    /// Red.
    Failure,
    /// Yellow.
    Warning,
    /// Cyan.
    Info,
}

impl Status {
    fn paint(self, message: &str) -> String {
        match self {
            Self::Success => message.green().to_string(),
            Self::Failure => message.red().to_string(),
            Self::Warning => message.yellow().to_string(),
            Self::Info => message.cyan().to_string(),
        }
    }
}

/// The operator's terminal: a line reader and a writer.
///
/// Generic over the streams so a session can be driven from byte buffers.
#[derive(Debug)]
pub struct Terminal<R, W> {
    reader: R,
    writer: W,
    color: bool,
}

impl<R, W> Terminal<R, W> {
    /// Creates a terminal with colored status lines.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            color: true,
        }
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Consumes the terminal and returns the writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Shows `label` and reads one line.
    ///
    /// The line is returned trimmed, with invalid UTF-8 replaced by U+FFFD.
    /// `None` means the input is closed.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from either stream.
    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.writer.write_all(label.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Writes one plain line.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub async fn line(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }

    /// Writes one status line in the color of `status`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub async fn status(&mut self, status: Status, message: &str) -> io::Result<()> {
        if self.color {
            let painted = status.paint(message);
            self.line(&painted).await
        } else {
            self.line(message).await
        }
    }
}
