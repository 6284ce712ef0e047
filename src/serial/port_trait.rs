//! Trait abstraction for line-oriented telemetry sources to enable testing

use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::framer::LineFramer;

/// Size of a single read from the underlying stream
const READ_CHUNK: usize = 256;

/// Source of telemetry lines with "one line or none" poll semantics
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LineSource: Send {
    /// Return one complete line if available within the poll window
    async fn poll_line(&mut self) -> io::Result<Option<String>>;

    /// Human-readable name for logs (device path, "demo", ...)
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: LineSource + ?Sized> LineSource for Box<T> {
    async fn poll_line(&mut self) -> io::Result<Option<String>> {
        (**self).poll_line().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Line reader over any async byte stream (serial port, pipe, test mock)
pub struct LineReader<R> {
    reader: R,
    framer: LineFramer,
    poll_timeout: Duration,
    label: String,
}

impl<R> std::fmt::Debug for LineReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("label", &self.label)
            .field("poll_timeout", &self.poll_timeout)
            .field("pending", &self.framer.pending())
            .finish_non_exhaustive()
    }
}

impl<R: AsyncRead + Unpin + Send> LineReader<R> {
    pub fn new(reader: R, label: impl Into<String>, poll_timeout: Duration) -> Self {
        Self {
            reader,
            framer: LineFramer::new(),
            poll_timeout,
            label: label.into(),
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> LineSource for LineReader<R> {
    async fn poll_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.framer.next_line() {
            return Ok(Some(line));
        }

        let mut chunk = [0u8; READ_CHUNK];
        match tokio::time::timeout(self.poll_timeout, self.reader.read(&mut chunk)).await {
            // Nothing arrived this tick
            Err(_) => Ok(None),
            Ok(Ok(0)) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{} closed", self.label),
            )),
            Ok(Ok(n)) => {
                self.framer.push(&chunk[..n]);
                Ok(self.framer.next_line())
            }
            Ok(Err(e)) => Err(e),
        }
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
