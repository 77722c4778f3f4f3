//! Snapshot of an output channel's state.

use crate::{error::BlockCause, output::OutputChannel};

/// What the transport has already done for the current request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputState {
    /// The response head has been sent.
    pub headers_sent: bool,
    /// Body bytes are pending in an output buffer.
    pub buffer_active: bool,
}

impl OutputState {
    /// Read the state of `channel` without touching it.
    pub fn probe<C: OutputChannel + ?Sized>(channel: &C) -> Self {
        Self {
            headers_sent: channel.headers_sent(),
            buffer_active: channel.is_buffering(),
        }
    }

    /// Nothing has been sent or buffered yet.
    #[must_use]
    pub fn is_clean(self) -> bool { !self.headers_sent && !self.buffer_active }

    /// Why emission would be refused in this state, if it is dirty.
    ///
    /// A sent head takes precedence over buffered output.
    #[must_use]
    pub fn block_cause(self) -> Option<BlockCause> {
        if self.headers_sent {
            Some(BlockCause::HeadersAlreadySent)
        } else if self.buffer_active {
            Some(BlockCause::OutputAlreadyEmitted)
        } else {
            None
        }
    }
}
