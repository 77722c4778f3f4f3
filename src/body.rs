//! Response body streams.
//!
//! A [`Body`] exposes the capabilities the emitters rely on: optional
//! seeking, optional chunked reading, and a raw content view for streams that
//! cannot be read incrementally.

use std::{
    fmt,
    io::{self, Read},
};

use bytes::Bytes;

/// Stream of response body bytes.
pub trait Body: Send + Sync + fmt::Debug {
    /// Returns true if the stream can be rewound.
    fn is_seekable(&self) -> bool;

    /// Returns true if the stream supports chunked reads.
    fn is_readable(&self) -> bool;

    /// Move the read position back to the start of the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be rewound.
    fn rewind(&mut self) -> io::Result<()>;

    /// Read up to `max` bytes from the current position.
    ///
    /// An empty result means the stream is exhausted; emitters stop reading
    /// even if [`Body::eof`] still returns false.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source fails.
    fn read(&mut self, max: usize) -> io::Result<Bytes>;

    /// Returns true once the read position reached the end of the stream.
    fn eof(&self) -> bool;

    /// Raw content written directly for streams that are not readable.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be produced.
    fn contents(&mut self) -> io::Result<Bytes>;
}

/// Seekable, readable in-memory body.
#[derive(Clone, Debug, Default)]
pub struct MemoryBody {
    data: Bytes,
    pos: usize,
}

impl MemoryBody {
    /// Create a body over `data`, positioned at the start.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Create an empty body.
    #[must_use]
    pub fn empty() -> Self { Self::default() }

    /// Current read position.
    #[must_use]
    pub fn position(&self) -> usize { self.pos }

    /// Total length in bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.data.len() }

    /// Returns true if the body holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.data.is_empty() }

    /// Move the read position to `pos`, clamped to the body length.
    pub fn seek(&mut self, pos: usize) { self.pos = pos.min(self.data.len()); }
}

impl Body for MemoryBody {
    fn is_seekable(&self) -> bool { true }

    fn is_readable(&self) -> bool { true }

    fn rewind(&mut self) -> io::Result<()> {
        self.pos = 0;
        Ok(())
    }

    fn read(&mut self, max: usize) -> io::Result<Bytes> {
        let end = self.pos.saturating_add(max).min(self.data.len());
        let chunk = self.data.slice(self.pos..end);
        self.pos = end;
        Ok(chunk)
    }

    fn eof(&self) -> bool { self.pos >= self.data.len() }

    fn contents(&mut self) -> io::Result<Bytes> {
        let rest = self.data.slice(self.pos..);
        self.pos = self.data.len();
        Ok(rest)
    }
}

/// Readable, non-seekable body backed by a blocking reader.
pub struct ReaderBody<R> {
    reader: R,
    eof: bool,
}

impl<R: Read + Send + Sync> ReaderBody<R> {
    /// Wrap `reader`.
    pub fn new(reader: R) -> Self { Self { reader, eof: false } }
}

impl<R> fmt::Debug for ReaderBody<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderBody").field("eof", &self.eof).finish_non_exhaustive()
    }
}

impl<R: Read + Send + Sync> Body for ReaderBody<R> {
    fn is_seekable(&self) -> bool { false }

    fn is_readable(&self) -> bool { true }

    fn rewind(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "reader body cannot be rewound",
        ))
    }

    fn read(&mut self, max: usize) -> io::Result<Bytes> {
        let mut buf = vec![0; max];
        let mut filled = 0;
        while filled < max {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => {
                    self.eof = true;
                    break;
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        buf.truncate(filled);
        Ok(Bytes::from(buf))
    }

    fn eof(&self) -> bool { self.eof }

    fn contents(&mut self) -> io::Result<Bytes> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        self.eof = true;
        Ok(Bytes::from(buf))
    }
}

/// Body that only exposes its raw content and cannot be read in chunks.
#[derive(Clone, Debug, Default)]
pub struct OpaqueBody {
    content: Bytes,
}

impl OpaqueBody {
    /// Create an opaque body over `content`.
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Body for OpaqueBody {
    fn is_seekable(&self) -> bool { false }

    fn is_readable(&self) -> bool { false }

    fn rewind(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "opaque body cannot be rewound",
        ))
    }

    fn read(&mut self, _max: usize) -> io::Result<Bytes> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "opaque body is not readable",
        ))
    }

    fn eof(&self) -> bool { true }

    fn contents(&mut self) -> io::Result<Bytes> { Ok(self.content.clone()) }
}
