//! Command line interface for the `emitframe` demo binary.
//!
//! Describes a response on the command line and the output state the
//! emitter should assume before writing it to stdout.

use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;

/// Command line arguments for the `emitframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "emitframe",
    version,
    about = "Emit an HTTP response to stdout"
)]
pub struct Cli {
    /// Status code.
    #[arg(short, long, default_value_t = 200)]
    pub status: u16,

    /// Reason phrase.
    #[arg(short, long)]
    pub reason: Option<String>,

    /// Protocol version.
    #[arg(long = "http-version", default_value = "1.1")]
    pub http_version: String,

    /// Header as `name: value`; repeat for several values.
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Literal body text.
    #[arg(short, long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Stream the body from a file.
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Pretend the response head was already sent.
    #[arg(long)]
    pub headers_sent: bool,

    /// Refuse to emit over a dirty output channel.
    #[arg(long)]
    pub no_force: bool,

    /// Body chunk size in bytes.
    #[arg(long, default_value = "8192")]
    pub chunk_size: NonZeroUsize,
}
