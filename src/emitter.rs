//! Response emission middleware.
//!
//! [`ResponseEmitter::process`] runs the next handler, inspects the output
//! channel and then either hands the response to a [`DelegateEmitter`] or
//! writes it manually. Manual emission skips the head when the transport has
//! already sent one and always streams the body.

use std::{
    fmt,
    num::NonZeroUsize,
    sync::{Arc, OnceLock},
};

use tracing::{debug, warn};

use crate::{
    config::EmitterConfig,
    delegate::{DelegateEmitter, EmitterFactory, default_factory},
    emit::{emit_headers, emit_status_line, stream_body},
    error::{EmissionBlocked, EmitError},
    metrics,
    middleware::{Handler, Next},
    output::OutputChannel,
    probe::OutputState,
    response::Response,
};

/// Middleware that writes the handler's response to the output channel
/// exactly once.
pub struct ResponseEmitter {
    config: EmitterConfig,
    emitter: OnceLock<Arc<dyn DelegateEmitter>>,
    factory: Option<EmitterFactory>,
}

impl Default for ResponseEmitter {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for ResponseEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseEmitter")
            .field("config", &self.config)
            .field("emitter_initialised", &self.emitter.get().is_some())
            .finish_non_exhaustive()
    }
}

impl ResponseEmitter {
    /// Create an emitter with the default policy and a lazily built
    /// [`crate::DirectEmitter`] delegate.
    #[must_use]
    pub fn new() -> Self { Self::with_config(EmitterConfig::default()) }

    /// Create an emitter using `config`.
    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            config,
            emitter: OnceLock::new(),
            factory: None,
        }
    }

    /// Use `emitter` as the delegate.
    #[must_use]
    pub fn with_emitter(mut self, emitter: Arc<dyn DelegateEmitter>) -> Self {
        self.set_emitter(emitter);
        self
    }

    /// Build the delegate with `factory` when none has been set.
    #[must_use]
    pub fn with_emitter_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn DelegateEmitter> + Send + Sync + 'static,
    {
        self.factory = Some(Arc::new(factory));
        self
    }

    /// Allow or refuse writing to a dirty output channel.
    #[must_use]
    pub fn with_force_emit(mut self, force_emit: bool) -> Self {
        self.config.set_force_emit(force_emit);
        self
    }

    /// Replace the set of header names exempt from replace semantics.
    #[must_use]
    pub fn with_replace_exempt<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_replace_exempt(names);
        self
    }

    /// Set the body chunk size used by manual emission.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        self.config = self.config.with_chunk_size(chunk_size);
        self
    }

    /// Active policy.
    #[must_use]
    pub fn config(&self) -> &EmitterConfig { &self.config }

    /// Whether a dirty output channel is still written to.
    #[must_use]
    pub fn force_emit(&self) -> bool { self.config.force_emit() }

    /// Set whether a dirty output channel is still written to.
    pub fn set_force_emit(&mut self, force_emit: bool) -> &mut Self {
        self.config.set_force_emit(force_emit);
        self
    }

    /// The delegate, built by the factory on first access.
    ///
    /// Without an injected factory a [`crate::DirectEmitter`] sharing this
    /// emitter's policy is built. Every call returns the same instance until
    /// [`Self::set_emitter`] replaces it.
    pub fn emitter(&self) -> Arc<dyn DelegateEmitter> {
        Arc::clone(self.emitter.get_or_init(|| {
            let factory = self
                .factory
                .clone()
                .unwrap_or_else(|| default_factory(self.config.clone()));
            factory()
        }))
    }

    /// Replace the delegate.
    pub fn set_emitter(&mut self, emitter: Arc<dyn DelegateEmitter>) -> &mut Self {
        self.emitter = OnceLock::from(emitter);
        self
    }

    /// Run `handler` and emit its response to `channel`.
    ///
    /// The handler always runs. A clean channel is handed to the delegate;
    /// a dirty one is refused unless forced emission is on, in which case the
    /// head is written only if the transport has not sent one and the body is
    /// always streamed. The handler's response is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EmitError::Handler`] if the handler fails,
    /// [`EmitError::Blocked`] if the channel is dirty and forced emission is
    /// off, and [`EmitError::Transport`] if a write fails.
    pub async fn process<Req, H, C>(
        &self,
        request: Req,
        handler: &H,
        channel: &mut C,
    ) -> Result<Response, EmitError<H::Error>>
    where
        Req: Send + 'static,
        H: Handler<Req> + ?Sized,
        C: OutputChannel,
    {
        let mut response = Next::new(handler)
            .call(request)
            .await
            .map_err(EmitError::Handler)?;

        let state = OutputState::probe(&*channel);
        let Some(cause) = state.block_cause() else {
            debug!(status = response.status(), "delegating response emission");
            self.emitter().emit(&mut response, channel).await?;
            metrics::inc_emissions(metrics::EmitPath::Delegate);
            return Ok(response);
        };

        if !self.config.force_emit() {
            warn!(
                status = response.status(),
                headers_sent = state.headers_sent,
                buffer_active = state.buffer_active,
                "response emission blocked: {cause}"
            );
            metrics::inc_blocked(cause);
            return Err(EmissionBlocked { cause }.into());
        }

        warn!(
            status = response.status(),
            headers_sent = state.headers_sent,
            buffer_active = state.buffer_active,
            "forcing response emission over dirty output"
        );
        if !state.headers_sent {
            emit_headers(channel, &response, &self.config).await?;
            emit_status_line(channel, &response).await?;
        }
        let written = stream_body(channel, response.body_mut(), self.config.chunk_size()).await?;
        metrics::inc_emissions(metrics::EmitPath::Fallback);
        metrics::add_body_bytes(written);
        Ok(response)
    }
}
