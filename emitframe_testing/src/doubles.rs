//! Handler and delegate doubles that count and record their calls.

use std::{
    io,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use emitframe::{DelegateEmitter, Handler, MemoryBody, OutputChannel, Response};

/// Error returned by a [`CountingHandler`] configured to fail.
#[derive(Debug)]
pub struct HandlerFailed;

impl std::fmt::Display for HandlerFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("handler failed") }
}

impl std::error::Error for HandlerFailed {}

/// Handler that builds a fresh response per call and counts invocations.
pub struct CountingHandler<F> {
    make: F,
    calls: AtomicUsize,
    fail: bool,
}

impl<F> CountingHandler<F>
where
    F: Fn() -> Response + Send + Sync,
{
    /// Create a handler producing responses with `make`.
    pub fn new(make: F) -> Self {
        Self {
            make,
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// Make every call fail with [`HandlerFailed`].
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Number of times the handler ran.
    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

#[async_trait]
impl<F> Handler<()> for CountingHandler<F>
where
    F: Fn() -> Response + Send + Sync,
{
    type Error = HandlerFailed;

    async fn handle(&self, _req: ()) -> Result<Response, HandlerFailed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(HandlerFailed);
        }
        Ok((self.make)())
    }
}

/// Delegate that records each response it is given and writes nothing.
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    seen: Mutex<Vec<String>>,
    fail_with: Option<io::ErrorKind>,
}

impl RecordingEmitter {
    /// Create a recording delegate.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Fail every emission with an error of `kind`.
    #[must_use]
    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            seen: Mutex::new(Vec::new()),
            fail_with: Some(kind),
        }
    }

    /// Number of emissions attempted.
    pub fn calls(&self) -> usize { self.seen.lock().expect("recording lock poisoned").len() }

    /// Debug rendering of every response handed over, in order.
    pub fn seen(&self) -> Vec<String> { self.seen.lock().expect("recording lock poisoned").clone() }
}

#[async_trait]
impl DelegateEmitter for RecordingEmitter {
    async fn emit(
        &self,
        response: &mut Response,
        _channel: &mut dyn OutputChannel,
    ) -> io::Result<()> {
        self.seen
            .lock()
            .expect("recording lock poisoned")
            .push(format!("{response:?}"));
        match self.fail_with {
            Some(kind) => Err(io::Error::new(kind, "delegate write failed")),
            None => Ok(()),
        }
    }
}

/// Deterministic body bytes of length `len`.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| u8::try_from(i % 251).expect("value below 251"))
        .collect()
}

/// `200 OK` response with an ordinary header, two cookies and a small body.
pub fn sample_response() -> Response {
    Response::new(200)
        .with_reason("OK")
        .with_header("X-Foo", "1")
        .with_header("Set-Cookie", "a=1")
        .with_header("Set-Cookie", "b=2")
        .with_body(MemoryBody::new("Hello World!"))
}
