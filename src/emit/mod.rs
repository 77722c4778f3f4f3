//! Manual emission steps.
//!
//! Each function writes one part of a response to an [`OutputChannel`]:
//! [`emit_headers`] the header lines, [`emit_status_line`] the status line
//! and [`stream_body`] the body. The orchestrator and the bundled delegates
//! compose them.
//!
//! [`OutputChannel`]: crate::output::OutputChannel

mod body;
mod header;
mod status;

pub use body::stream_body;
pub use header::emit_headers;
pub use status::{emit_status_line, status_line};
