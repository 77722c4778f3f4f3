//! Chunked body streaming.

use std::{io, num::NonZeroUsize};

use crate::{body::Body, output::OutputChannel};

/// Stream `body` to `channel` and return the number of bytes written.
///
/// Seekable bodies are rewound first. A body that is not readable has its
/// raw contents written in a single call; otherwise the body is read and
/// written one chunk of at most `chunk_size` bytes at a time until it
/// reports end of stream. An empty read also ends the stream.
///
/// # Errors
///
/// Propagates body read and channel write failures. Bytes already written
/// stay written.
pub async fn stream_body<C>(
    channel: &mut C,
    body: &mut dyn Body,
    chunk_size: NonZeroUsize,
) -> io::Result<u64>
where
    C: OutputChannel + ?Sized,
{
    if body.is_seekable() {
        body.rewind()?;
    }

    if !body.is_readable() {
        let contents = body.contents()?;
        let len = contents.len() as u64;
        channel.write(contents).await?;
        return Ok(len);
    }

    let mut written = 0u64;
    while !body.eof() {
        let chunk = body.read(chunk_size.get())?;
        if chunk.is_empty() {
            break;
        }
        written += chunk.len() as u64;
        channel.write(chunk).await?;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::Bytes;
    use rstest::rstest;

    use super::*;
    use crate::{
        body::{MemoryBody, OpaqueBody, ReaderBody},
        config::DEFAULT_CHUNK_SIZE,
        output::MemoryChannel,
    };

    fn payload(len: usize) -> Vec<u8> { (0..len).map(|i| (i % 251) as u8).collect() }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(8192, 1)]
    #[case(8193, 2)]
    #[case(3 * 8192 + 17, 4)]
    #[tokio::test]
    async fn writes_one_call_per_chunk(#[case] len: usize, #[case] writes: usize) {
        let data = payload(len);
        let mut body = MemoryBody::new(data.clone());
        let mut channel = MemoryChannel::new();

        let written = stream_body(&mut channel, &mut body, DEFAULT_CHUNK_SIZE)
            .await
            .expect("stream body");

        assert_eq!(written, len as u64);
        assert_eq!(channel.chunks().len(), writes);
        assert!(channel.chunks().iter().all(|c| c.len() <= 8192));
        assert_eq!(channel.body(), Bytes::from(data));
    }

    #[tokio::test]
    async fn rewinds_seekable_body_before_reading() {
        let mut body = MemoryBody::new("Hello World!");
        body.seek(6);
        let mut channel = MemoryChannel::new();

        stream_body(&mut channel, &mut body, DEFAULT_CHUNK_SIZE)
            .await
            .expect("stream body");

        assert_eq!(channel.body(), Bytes::from_static(b"Hello World!"));
    }

    #[tokio::test]
    async fn opaque_body_is_written_once() {
        let mut body = OpaqueBody::new(payload(20_000));
        let mut channel = MemoryChannel::new();

        let written = stream_body(&mut channel, &mut body, DEFAULT_CHUNK_SIZE)
            .await
            .expect("stream body");

        assert_eq!(written, 20_000);
        assert_eq!(channel.chunks().len(), 1);
    }

    #[tokio::test]
    async fn reader_body_exact_multiple_skips_empty_tail() {
        let mut body = ReaderBody::new(Cursor::new(payload(16)));
        let mut channel = MemoryChannel::new();
        let chunk = NonZeroUsize::new(8).expect("non-zero");

        stream_body(&mut channel, &mut body, chunk)
            .await
            .expect("stream body");

        assert_eq!(channel.chunks().len(), 2);
        assert_eq!(channel.body(), Bytes::from(payload(16)));
    }

    /// Readable body that never reports end of stream on its own.
    #[derive(Debug)]
    struct StalledBody {
        pending: Option<Bytes>,
        reads: usize,
    }

    impl Body for StalledBody {
        fn is_seekable(&self) -> bool { false }

        fn is_readable(&self) -> bool { true }

        fn rewind(&mut self) -> io::Result<()> { Err(io::ErrorKind::Unsupported.into()) }

        fn read(&mut self, _max: usize) -> io::Result<Bytes> {
            self.reads += 1;
            Ok(self.pending.take().unwrap_or_default())
        }

        fn eof(&self) -> bool { false }

        fn contents(&mut self) -> io::Result<Bytes> { Ok(Bytes::new()) }
    }

    #[tokio::test]
    async fn empty_read_ends_stream_without_eof() {
        let mut body = StalledBody {
            pending: Some(Bytes::from_static(b"partial")),
            reads: 0,
        };
        let mut channel = MemoryChannel::new();

        let written = stream_body(&mut channel, &mut body, DEFAULT_CHUNK_SIZE)
            .await
            .expect("stream body");

        assert_eq!(written, 7);
        assert_eq!(body.reads, 2);
        assert_eq!(channel.chunks(), &[Bytes::from_static(b"partial")]);
    }

    #[tokio::test]
    async fn write_failure_leaves_truncated_output() {
        let mut body = MemoryBody::new(payload(20));
        let mut channel = MemoryChannel::new().fail_after(2);
        let chunk = NonZeroUsize::new(5).expect("non-zero");

        let err = stream_body(&mut channel, &mut body, chunk)
            .await
            .expect_err("third write fails");

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(channel.body(), Bytes::from(payload(10)));
    }
}
