//! Recording output channel.

use std::io;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};

use super::OutputChannel;

/// A single `write_header` call as seen by the channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCall {
    /// Full header or status line.
    pub line: String,
    /// Whether the line replaces earlier lines of the same name.
    pub replace: bool,
    /// Status code passed alongside the line.
    pub status: u16,
}

impl HeaderCall {
    /// Convenience constructor.
    pub fn new(line: impl Into<String>, replace: bool, status: u16) -> Self {
        Self {
            line: line.into(),
            replace,
            status,
        }
    }
}

/// Channel that keeps every header call and body chunk in memory.
///
/// The first body write marks the head as sent, mirroring a transport that
/// flushes headers before any body bytes.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    headers_sent: bool,
    buffering: bool,
    headers: Vec<HeaderCall>,
    chunks: Vec<Bytes>,
    fail_after: Option<usize>,
}

impl MemoryChannel {
    /// Create a clean channel.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Start with the response head already sent.
    #[must_use]
    pub fn with_headers_sent(mut self, sent: bool) -> Self {
        self.headers_sent = sent;
        self
    }

    /// Start with bytes pending in the output buffer.
    #[must_use]
    pub fn with_buffered(mut self, buffering: bool) -> Self {
        self.buffering = buffering;
        self
    }

    /// Fail every body write after `writes` successful ones.
    #[must_use]
    pub fn fail_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Header calls in the order they were made.
    #[must_use]
    pub fn header_calls(&self) -> &[HeaderCall] { &self.headers }

    /// Body writes in the order they were made.
    #[must_use]
    pub fn chunks(&self) -> &[Bytes] { &self.chunks }

    /// All body bytes concatenated.
    #[must_use]
    pub fn body(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.chunks.iter().map(Bytes::len).sum());
        for chunk in &self.chunks {
            out.extend_from_slice(chunk);
        }
        out.freeze()
    }
}

#[async_trait]
impl OutputChannel for MemoryChannel {
    fn headers_sent(&self) -> bool { self.headers_sent }

    fn is_buffering(&self) -> bool { self.buffering }

    async fn write_header(&mut self, line: &str, replace: bool, status: u16) -> io::Result<()> {
        if self.headers_sent {
            return Err(io::Error::other("headers already sent"));
        }
        self.headers.push(HeaderCall::new(line, replace, status));
        Ok(())
    }

    async fn write(&mut self, bytes: Bytes) -> io::Result<()> {
        if self.fail_after.is_some_and(|limit| self.chunks.len() >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "injected write failure"));
        }
        self.headers_sent = true;
        self.chunks.push(bytes);
        Ok(())
    }
}
