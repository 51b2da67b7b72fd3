//! Line-oriented session transport.
//!
//! The engine and the command layer only ever need two things from a
//! connection: "write one line" and "write a prompt, then await one line of
//! input". Both are behind the [`Transport`] trait so sessions can be driven
//! by a real TCP socket or by a scripted transport in tests.

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

/// Connection-level failures. Not recoverable by the session engine.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The peer disconnected (EOF while awaiting input).
    #[error("connection closed")]
    Closed,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-connection line transport.
#[async_trait]
pub trait Transport: Send {
    /// Write `prompt` (without a trailing newline) and await exactly one line
    /// of input, returned with surrounding whitespace trimmed.
    async fn prompt_line(&mut self, prompt: &str) -> Result<String, TransportError>;

    /// Write one line of output, newline-terminated.
    async fn write_line(&mut self, line: &str) -> Result<(), TransportError>;
}

/// [`Transport`] over a TCP stream, one buffered reader half and one writer
/// half.
pub struct LineTransport {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    buf: String,
}

impl LineTransport {
    pub fn new(stream: TcpStream) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: write_half,
            buf: String::new(),
        }
    }
}

#[async_trait]
impl Transport for LineTransport {
    async fn prompt_line(&mut self, prompt: &str) -> Result<String, TransportError> {
        self.writer.write_all(prompt.as_bytes()).await?;
        self.writer.flush().await?;

        self.buf.clear();
        let bytes_read = self.reader.read_line(&mut self.buf).await?;
        if bytes_read == 0 {
            return Err(TransportError::Closed);
        }
        Ok(self.buf.trim().to_string())
    }

    async fn write_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}
