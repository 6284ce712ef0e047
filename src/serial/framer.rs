//! Newline framing over a raw serial byte stream

use bytes::{Buf, BytesMut};
use tracing::warn;

/// Longest line kept while waiting for a terminator
pub const MAX_LINE_LEN: usize = 1024;

/// Accumulates serial bytes and splits them into `\n`-terminated lines.
///
/// Bytes after the last terminator stay buffered until more data arrives.
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: BytesMut,
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(MAX_LINE_LEN),
        }
    }

    /// Append raw bytes read from the port.
    ///
    /// An unterminated run longer than [`MAX_LINE_LEN`] is dropped.
    pub fn push(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);

        if self.buf.len() > MAX_LINE_LEN && !self.buf.contains(&b'\n') {
            warn!("Discarding {} bytes without line terminator", self.buf.len());
            self.buf.clear();
        }
    }

    /// Pop the next complete line, without its `\n` / `\r\n` terminator.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let mut line = self.buf.split_to(pos);
        self.buf.advance(1);

        if line.last() == Some(&b'\r') {
            line.truncate(line.len() - 1);
        }

        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Bytes waiting for a terminator
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}
