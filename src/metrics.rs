//! Metric helpers for `emitframe`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate. Without the
//! `metrics` feature the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::error::BlockCause;

/// Name of the counter tracking completed emissions.
pub const EMISSIONS_TOTAL: &str = "emitframe_emissions_total";
/// Name of the counter tracking refused emissions.
pub const BLOCKED_TOTAL: &str = "emitframe_blocked_total";
/// Name of the counter tracking body bytes written by manual emission.
pub const BODY_BYTES_TOTAL: &str = "emitframe_body_bytes_total";

/// How a response reached the output channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitPath {
    /// The delegate emitter wrote the response.
    Delegate,
    /// The response was written manually over a dirty channel.
    Fallback,
}

impl EmitPath {
    /// Label value used for the `path` label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EmitPath::Delegate => "delegate",
            EmitPath::Fallback => "fallback",
        }
    }
}

/// Record a completed emission along `path`.
pub fn inc_emissions(path: EmitPath) {
    #[cfg(feature = "metrics")]
    counter!(EMISSIONS_TOTAL, "path" => path.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = path;
}

/// Record an emission refused for `cause`.
pub fn inc_blocked(cause: BlockCause) {
    #[cfg(feature = "metrics")]
    counter!(BLOCKED_TOTAL, "cause" => cause.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = cause;
}

/// Record `bytes` body bytes written by manual emission.
pub fn add_body_bytes(bytes: u64) {
    #[cfg(feature = "metrics")]
    counter!(BODY_BYTES_TOTAL).increment(bytes);
    #[cfg(not(feature = "metrics"))]
    let _ = bytes;
}
