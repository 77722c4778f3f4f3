//! Handler plumbing for the emitter middleware.
//!
//! [`Handler`] is the next stage of the request pipeline: it turns a request
//! into a [`Response`]. [`Next`] wraps a handler reference so middleware can
//! forward the request exactly once.

use std::{future::Future, marker::PhantomData};

use async_trait::async_trait;

use crate::response::Response;

/// Trait representing the asynchronous stage that produces a response.
#[async_trait]
pub trait Handler<Req>: Send + Sync
where
    Req: Send + 'static,
{
    /// Error type returned by the handler.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Handle the incoming request and produce a response.
    async fn handle(&self, req: Req) -> Result<Response, Self::Error>;
}

/// Continuation used by middleware to call the next handler in the chain.
pub struct Next<'a, H: ?Sized> {
    handler: &'a H,
}

impl<'a, H: ?Sized> Next<'a, H> {
    /// Creates a new `Next` instance wrapping a reference to the given handler.
    pub const fn new(handler: &'a H) -> Self { Self { handler } }

    /// Call the next handler with the given request.
    ///
    /// # Errors
    ///
    /// Propagates any error produced by the wrapped handler.
    pub async fn call<Req>(&self, req: Req) -> Result<Response, H::Error>
    where
        H: Handler<Req>,
        Req: Send + 'static,
    {
        self.handler.handle(req).await
    }
}

/// Handler backed by an async closure. Build one with [`handler_fn`].
pub struct HandlerFn<F, Req> {
    f: F,
    _req: PhantomData<fn(Req)>,
}

/// Wrap an async closure as a [`Handler`].
///
/// # Examples
///
/// ```
/// use emitframe::{Response, middleware::handler_fn};
///
/// let handler = handler_fn(|_req: ()| async {
///     Ok::<_, std::io::Error>(Response::new(204))
/// });
/// # let _ = handler;
/// ```
pub fn handler_fn<F, Fut, Req, E>(f: F) -> HandlerFn<F, Req>
where
    F: Fn(Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, E>> + Send,
{
    HandlerFn {
        f,
        _req: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, Req, E> Handler<Req> for HandlerFn<F, Req>
where
    F: Fn(Req) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, E>> + Send,
    Req: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    async fn handle(&self, req: Req) -> Result<Response, E> { (self.f)(req).await }
}
