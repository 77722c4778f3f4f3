//! Per-request transport output.
//!
//! An [`OutputChannel`] is the only place emitted bytes go. It also reports
//! whether the response head has already left and whether body bytes are
//! pending in an output buffer, which the emitter consults before writing.
//!
//! [`MemoryChannel`] records every call for inspection, while
//! [`WriterChannel`] serialises an HTTP/1.x response onto an async writer.

use std::io;

use async_trait::async_trait;
use bytes::Bytes;

mod memory;
mod writer;

pub use memory::{HeaderCall, MemoryChannel};
pub use writer::{DEFAULT_BUFFER_CAPACITY, WriterChannel};

/// Output side of a single request's transport.
#[async_trait]
pub trait OutputChannel: Send {
    /// Returns true once the response head has been sent.
    fn headers_sent(&self) -> bool;

    /// Returns true while body bytes sit in an output buffer.
    fn is_buffering(&self) -> bool;

    /// Queue a header or status line.
    ///
    /// With `replace` set, the line supersedes earlier lines of the same
    /// name. `status` is the response code the line belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the head can no longer be changed or the transport
    /// fails.
    async fn write_header(&mut self, line: &str, replace: bool, status: u16) -> io::Result<()>;

    /// Write body bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    async fn write(&mut self, bytes: Bytes) -> io::Result<()>;
}
