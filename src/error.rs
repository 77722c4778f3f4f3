//! Canonical error types for response emission.
//!
//! [`EmitError`] separates a refused emission from transport failures and
//! errors raised by the wrapped handler.

use std::{fmt, io};

use thiserror::Error;

/// Reason a dirty output channel refused emission.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCause {
    /// The transport already sent the response head.
    HeadersAlreadySent,
    /// Body bytes were already written or are sitting in the output buffer.
    OutputAlreadyEmitted,
}

impl BlockCause {
    /// Stable label used in logs and metrics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BlockCause::HeadersAlreadySent => "headers_already_sent",
            BlockCause::OutputAlreadyEmitted => "output_already_emitted",
        }
    }
}

impl fmt::Display for BlockCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockCause::HeadersAlreadySent => "headers already sent",
            BlockCause::OutputAlreadyEmitted => "output has been emitted previously",
        })
    }
}

/// Emission was refused because the output channel was not clean and
/// forced emission is disabled.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unable to emit response; {cause}")]
pub struct EmissionBlocked {
    /// Which part of the output state blocked emission.
    pub cause: BlockCause,
}

/// Errors returned by [`crate::ResponseEmitter::process`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EmitError<E> {
    /// The output channel was dirty and forced emission is disabled.
    #[error(transparent)]
    Blocked(#[from] EmissionBlocked),
    /// Writing to the transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
    /// The wrapped handler failed before a response existed.
    #[error("handler error: {0}")]
    Handler(#[source] E),
}

impl<E> EmitError<E> {
    /// Returns the block cause if emission was refused.
    #[must_use]
    pub fn block_cause(&self) -> Option<BlockCause> {
        match self {
            Self::Blocked(blocked) => Some(blocked.cause),
            _ => None,
        }
    }
}
