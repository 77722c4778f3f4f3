//! Status line formatting.

use std::io;

use crate::{output::OutputChannel, response::Response};

/// Format `HTTP/{version} {code}[ {reason}]` for `response`.
#[must_use]
pub fn status_line(response: &Response) -> String {
    match response.reason().filter(|reason| !reason.is_empty()) {
        Some(reason) => format!("HTTP/{} {} {reason}", response.version(), response.status()),
        None => format!("HTTP/{} {}", response.version(), response.status()),
    }
}

/// Write the status line with replace semantics.
///
/// # Errors
///
/// Propagates channel write failures.
pub async fn emit_status_line<C>(channel: &mut C, response: &Response) -> io::Result<()>
where
    C: OutputChannel + ?Sized,
{
    channel
        .write_header(&status_line(response), true, response.status())
        .await
}
