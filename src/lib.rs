#![doc(html_root_url = "https://docs.rs/emitframe/latest")]
//! Public API for the `emitframe` library.
//!
//! This crate writes a handler's HTTP response to a per-request output
//! channel exactly once, delegating to a complete emission strategy when the
//! channel is clean and falling back to manual header, status line and
//! chunked body emission when it is not.

pub mod body;
pub mod config;
pub mod delegate;
pub mod emit;
pub mod emitter;
pub mod error;
pub mod headers;
pub mod metrics;
pub mod middleware;
pub mod output;
pub mod probe;
pub mod response;

pub use body::{Body, MemoryBody, OpaqueBody, ReaderBody};
pub use config::{DEFAULT_CHUNK_SIZE, EmitterConfig};
pub use delegate::{DelegateEmitter, DirectEmitter, EmitterFactory, StreamEmitter};
pub use emitter::ResponseEmitter;
pub use error::{BlockCause, EmissionBlocked, EmitError};
pub use headers::HeaderMap;
pub use metrics::{BLOCKED_TOTAL, BODY_BYTES_TOTAL, EMISSIONS_TOTAL, EmitPath};
pub use middleware::{Handler, Next, handler_fn};
pub use output::{HeaderCall, MemoryChannel, OutputChannel, WriterChannel};
pub use probe::OutputState;
pub use response::Response;
