//! Header line emission.

use std::io;

use crate::{
    config::EmitterConfig,
    headers::canonicalize,
    output::OutputChannel,
    response::Response,
};

/// Write every header of `response` in insertion order.
///
/// Names are canonicalised to Train-Case. The first value of a header
/// replaces earlier lines of that name unless the name is exempt in
/// `config`; later values are always appended.
///
/// # Errors
///
/// Propagates channel write failures.
pub async fn emit_headers<C>(
    channel: &mut C,
    response: &Response,
    config: &EmitterConfig,
) -> io::Result<()>
where
    C: OutputChannel + ?Sized,
{
    let status = response.status();
    for (name, values) in response.headers().iter() {
        let name = canonicalize(name);
        let mut replace = !config.is_replace_exempt(&name);
        for value in values {
            let line = format!("{name}: {value}");
            channel.write_header(&line, replace, status).await?;
            replace = false;
        }
    }
    Ok(())
}
