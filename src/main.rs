//! Demo binary writing a response described on the command line to stdout.
//!
//! `--headers-sent` flushes an empty head first so the emitter takes the
//! manual path; `--no-force` makes that path fail instead.

mod cli;

use std::{fs::File, io};

use clap::Parser;
use emitframe::{
    MemoryBody,
    ReaderBody,
    Response,
    ResponseEmitter,
    WriterChannel,
    middleware::handler_fn,
};

fn build_response(cli: &cli::Cli) -> io::Result<Response> {
    let mut response = Response::new(cli.status).with_version(cli.http_version.clone());
    if let Some(reason) = &cli.reason {
        response = response.with_reason(reason.clone());
    }
    for header in &cli.headers {
        let (name, value) = header.split_once(':').ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("header {header:?} is not `name: value`"),
            )
        })?;
        response = response.with_header(name.trim(), value.trim());
    }
    if let Some(path) = &cli.body_file {
        response = response.with_body(ReaderBody::new(File::open(path)?));
    } else if let Some(body) = &cli.body {
        response = response.with_body(MemoryBody::new(body.clone()));
    }
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Enable structured logging for the demo; logs go to stderr so they do
    // not mix with the emitted response.
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = cli::Cli::parse();
    let emitter = ResponseEmitter::new()
        .with_force_emit(!cli.no_force)
        .with_chunk_size(cli.chunk_size);
    let handler = handler_fn(|(): ()| std::future::ready(build_response(&cli)));

    let mut channel = WriterChannel::new(tokio::io::stdout());
    if cli.headers_sent {
        channel.finish().await?;
    }
    emitter.process((), &handler, &mut channel).await?;
    channel.finish().await?;
    Ok(())
}
