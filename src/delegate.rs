//! Delegate emission strategies.
//!
//! A [`DelegateEmitter`] writes a complete response in one call when the
//! output channel is clean. [`DirectEmitter`] writes the whole body at once;
//! [`StreamEmitter`] streams it in bounded chunks.

use std::{io, num::NonZeroUsize, sync::Arc};

use async_trait::async_trait;

use crate::{
    config::{DEFAULT_CHUNK_SIZE, EmitterConfig},
    emit::{emit_headers, emit_status_line, stream_body},
    output::OutputChannel,
    response::Response,
};

/// Strategy that emits a complete response.
#[async_trait]
pub trait DelegateEmitter: Send + Sync {
    /// Write `response` to `channel`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport write fails.
    async fn emit(&self, response: &mut Response, channel: &mut dyn OutputChannel)
    -> io::Result<()>;
}

/// Builds the default delegate on first use.
pub type EmitterFactory = Arc<dyn Fn() -> Arc<dyn DelegateEmitter> + Send + Sync>;

/// Factory producing a [`DirectEmitter`] that applies `config`.
#[must_use]
pub fn default_factory(config: EmitterConfig) -> EmitterFactory {
    Arc::new(move || Arc::new(DirectEmitter::new(config.clone())) as Arc<dyn DelegateEmitter>)
}

fn ensure_head_unsent(channel: &dyn OutputChannel) -> io::Result<()> {
    if channel.headers_sent() {
        return Err(io::Error::other("unable to emit response; headers already sent"));
    }
    Ok(())
}

async fn emit_head(
    response: &Response,
    channel: &mut dyn OutputChannel,
    config: &EmitterConfig,
) -> io::Result<()> {
    ensure_head_unsent(channel)?;
    emit_headers(channel, response, config).await?;
    emit_status_line(channel, response).await
}

/// Writes headers, the status line and the whole body in one write.
#[derive(Debug, Default)]
pub struct DirectEmitter {
    config: EmitterConfig,
}

impl DirectEmitter {
    /// Create an emitter using `config` for header replace rules.
    #[must_use]
    pub fn new(config: EmitterConfig) -> Self { Self { config } }
}

#[async_trait]
impl DelegateEmitter for DirectEmitter {
    async fn emit(
        &self,
        response: &mut Response,
        channel: &mut dyn OutputChannel,
    ) -> io::Result<()> {
        emit_head(response, channel, &self.config).await?;
        let body = response.body_mut();
        if body.is_seekable() {
            body.rewind()?;
        }
        let contents = body.contents()?;
        if contents.is_empty() {
            return Ok(());
        }
        channel.write(contents).await
    }
}

/// Writes headers and the status line, then streams the body in chunks of
/// at most `max_buffer_length` bytes.
#[derive(Debug)]
pub struct StreamEmitter {
    config: EmitterConfig,
    max_buffer_length: NonZeroUsize,
}

impl Default for StreamEmitter {
    fn default() -> Self { Self::new(DEFAULT_CHUNK_SIZE) }
}

impl StreamEmitter {
    /// Create an emitter streaming `max_buffer_length` bytes per write.
    #[must_use]
    pub fn new(max_buffer_length: NonZeroUsize) -> Self {
        Self {
            config: EmitterConfig::default(),
            max_buffer_length,
        }
    }

    /// Use `config` for header replace rules.
    #[must_use]
    pub fn with_config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Bytes written per body chunk.
    #[must_use]
    pub fn max_buffer_length(&self) -> NonZeroUsize { self.max_buffer_length }
}

#[async_trait]
impl DelegateEmitter for StreamEmitter {
    async fn emit(
        &self,
        response: &mut Response,
        channel: &mut dyn OutputChannel,
    ) -> io::Result<()> {
        emit_head(response, channel, &self.config).await?;
        stream_body(channel, response.body_mut(), self.max_buffer_length).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::{
        body::{MemoryBody, OpaqueBody},
        output::{HeaderCall, MemoryChannel},
    };

    fn response() -> Response {
        Response::new(201)
            .with_reason("Created")
            .with_header("location", "/items/7")
            .with_body(MemoryBody::new("created"))
    }

    #[tokio::test]
    async fn direct_emitter_writes_body_once() {
        let mut response = response();
        let mut channel = MemoryChannel::new();

        DirectEmitter::default()
            .emit(&mut response, &mut channel)
            .await
            .expect("emit");

        assert_eq!(
            channel.header_calls(),
            &[
                HeaderCall::new("Location: /items/7", true, 201),
                HeaderCall::new("HTTP/1.1 201 Created", true, 201),
            ]
        );
        assert_eq!(channel.chunks(), &[Bytes::from_static(b"created")]);
    }

    #[tokio::test]
    async fn direct_emitter_refuses_sent_head() {
        let mut response = response();
        let mut channel = MemoryChannel::new().with_headers_sent(true);

        let err = DirectEmitter::default()
            .emit(&mut response, &mut channel)
            .await
            .expect_err("head already sent");

        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert!(channel.chunks().is_empty());
    }

    #[tokio::test]
    async fn direct_emitter_writes_opaque_contents() {
        let mut response = Response::new(200).with_body(OpaqueBody::new("raw"));
        let mut channel = MemoryChannel::new();

        DirectEmitter::default()
            .emit(&mut response, &mut channel)
            .await
            .expect("emit");

        assert_eq!(channel.body(), Bytes::from_static(b"raw"));
    }

    #[tokio::test]
    async fn stream_emitter_chunks_body() {
        let mut response = response();
        let mut channel = MemoryChannel::new();
        let emitter = StreamEmitter::new(NonZeroUsize::new(3).expect("non-zero"));

        emitter.emit(&mut response, &mut channel).await.expect("emit");

        assert_eq!(emitter.max_buffer_length().get(), 3);
        assert_eq!(channel.chunks().len(), 3);
        assert_eq!(channel.body(), Bytes::from_static(b"created"));
    }

    #[tokio::test]
    async fn default_factory_applies_config() {
        let config = EmitterConfig::new().with_replace_exempt(["Location"]);
        let emitter = default_factory(config)();
        let mut response = response().with_header("location", "/items/8");
        let mut channel = MemoryChannel::new();

        emitter.emit(&mut response, &mut channel).await.expect("emit");

        assert_eq!(
            &channel.header_calls()[..2],
            &[
                HeaderCall::new("Location: /items/7", false, 201),
                HeaderCall::new("Location: /items/8", false, 201),
            ]
        );
    }
}
