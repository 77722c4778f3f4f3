//! HTTP/1.x output channel over an async writer.

use std::io;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::OutputChannel;

/// Body bytes held back before the head is flushed.
pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// Serialises a response head and body onto `W`.
///
/// Header lines are collected until the first flush. Body bytes are held in
/// an output buffer of bounded capacity; once it would overflow, or when
/// [`WriterChannel::finish`] runs, the head is written followed by the
/// buffered bytes.
pub struct WriterChannel<W> {
    writer: W,
    status_line: Option<String>,
    status: u16,
    lines: Vec<String>,
    head_sent: bool,
    buffer: BytesMut,
    capacity: usize,
}

impl<W> WriterChannel<W>
where
    W: AsyncWrite + Unpin + Send,
{
    /// Wrap `writer` with the default buffer capacity.
    pub fn new(writer: W) -> Self { Self::with_capacity(writer, DEFAULT_BUFFER_CAPACITY) }

    /// Wrap `writer`, buffering up to `capacity` body bytes.
    ///
    /// A capacity of zero writes the head and every body chunk immediately.
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            writer,
            status_line: None,
            status: 200,
            lines: Vec::new(),
            head_sent: false,
            buffer: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Header lines queued so far, excluding the status line.
    #[must_use]
    pub fn header_lines(&self) -> &[String] { &self.lines }

    fn render_head(&self) -> String {
        let mut head = self
            .status_line
            .clone()
            .unwrap_or_else(|| format!("HTTP/1.1 {}", self.status));
        head.push_str("\r\n");
        for line in &self.lines {
            head.push_str(line);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");
        head
    }

    async fn send_head(&mut self) -> io::Result<()> {
        if self.head_sent {
            return Ok(());
        }
        let head = self.render_head();
        self.head_sent = true;
        debug!(
            "sending response head: status={}, header_lines={}",
            self.status,
            self.lines.len()
        );
        self.writer.write_all(head.as_bytes()).await
    }

    async fn drain_buffer(&mut self) -> io::Result<()> {
        self.send_head().await?;
        if !self.buffer.is_empty() {
            let pending = self.buffer.split().freeze();
            self.writer.write_all(&pending).await?;
        }
        Ok(())
    }

    /// Flush the head and any buffered body bytes to the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub async fn finish(&mut self) -> io::Result<()> {
        self.drain_buffer().await?;
        self.writer.flush().await
    }

    /// Consume the channel and return the writer.
    ///
    /// Call [`WriterChannel::finish`] first; unflushed bytes are dropped.
    pub fn into_inner(self) -> W { self.writer }
}

fn header_name(line: &str) -> &str { line.split_once(':').map_or(line, |(name, _)| name).trim() }

#[async_trait]
impl<W> OutputChannel for WriterChannel<W>
where
    W: AsyncWrite + Unpin + Send,
{
    fn headers_sent(&self) -> bool { self.head_sent }

    fn is_buffering(&self) -> bool { !self.buffer.is_empty() }

    async fn write_header(&mut self, line: &str, replace: bool, status: u16) -> io::Result<()> {
        if self.head_sent {
            return Err(io::Error::other("cannot modify header, head already sent"));
        }
        self.status = status;
        if line.starts_with("HTTP/") {
            self.status_line = Some(line.to_owned());
            return Ok(());
        }
        if replace {
            let name = header_name(line);
            self.lines
                .retain(|existing| !header_name(existing).eq_ignore_ascii_case(name));
        }
        self.lines.push(line.to_owned());
        Ok(())
    }

    async fn write(&mut self, bytes: Bytes) -> io::Result<()> {
        if self.buffer.len() + bytes.len() <= self.capacity {
            self.buffer.extend_from_slice(&bytes);
            return Ok(());
        }
        self.drain_buffer().await?;
        self.writer.write_all(&bytes).await
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    async fn render(mut channel: WriterChannel<Vec<u8>>) -> String {
        channel.finish().await.expect("finish");
        String::from_utf8(channel.into_inner()).expect("utf8 output")
    }

    #[tokio::test]
    async fn replacing_header_drops_earlier_values() {
        let mut channel = WriterChannel::new(Vec::new());
        channel.write_header("Vary: Accept", true, 200).await.expect("header");
        channel.write_header("vary: Origin", false, 200).await.expect("header");
        channel.write_header("VARY: Cookie", true, 200).await.expect("header");
        channel.write_header("HTTP/1.1 200 OK", true, 200).await.expect("status");

        assert_eq!(channel.header_lines(), &["VARY: Cookie".to_owned()]);
        assert_eq!(render(channel).await, "HTTP/1.1 200 OK\r\nVARY: Cookie\r\n\r\n");
    }

    #[tokio::test]
    async fn missing_status_line_uses_last_status() {
        let mut channel = WriterChannel::new(Vec::new());
        channel.write_header("X-Foo: 1", true, 404).await.expect("header");
        channel.write(Bytes::from_static(b"gone")).await.expect("body");

        assert_eq!(render(channel).await, "HTTP/1.1 404\r\nX-Foo: 1\r\n\r\ngone");
    }

    #[rstest]
    #[case(0, false)]
    #[case(2, false)]
    #[case(64, true)]
    #[tokio::test]
    async fn buffering_depends_on_capacity(#[case] capacity: usize, #[case] buffering: bool) {
        let mut channel = WriterChannel::with_capacity(Vec::new(), capacity);
        channel.write(Bytes::from_static(b"abc")).await.expect("body");

        assert_eq!(channel.is_buffering(), buffering);
        assert_eq!(channel.headers_sent(), !buffering);
        assert_eq!(render(channel).await, "HTTP/1.1 200\r\n\r\nabc");
    }

    #[tokio::test]
    async fn header_after_head_is_rejected() {
        let mut channel = WriterChannel::with_capacity(Vec::new(), 0);
        channel.write(Bytes::from_static(b"x")).await.expect("body");
        let err = channel
            .write_header("X-Late: 1", true, 200)
            .await
            .expect_err("late header should fail");
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
