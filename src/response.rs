//! HTTP response value handed to the emitter.
//!
//! `Response` carries exactly what emission needs: status, reason phrase,
//! protocol version, ordered headers and a [`Body`] stream.

use std::fmt;

use crate::{
    body::{Body, MemoryBody},
    headers::HeaderMap,
};

/// Protocol version used when none is set explicitly.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

/// A fully constructed HTTP response.
pub struct Response {
    status: u16,
    reason: Option<String>,
    version: String,
    headers: HeaderMap,
    body: Box<dyn Body>,
}

impl Response {
    /// Create a response with `status`, HTTP/1.1 and an empty body.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            reason: None,
            version: DEFAULT_PROTOCOL_VERSION.to_owned(),
            headers: HeaderMap::new(),
            body: Box::new(MemoryBody::empty()),
        }
    }

    /// Set the reason phrase.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the protocol version, for example `"1.0"` or `"2"`.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Append a header value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Body + 'static) -> Self {
        self.body = Box::new(body);
        self
    }

    /// Status code.
    #[must_use]
    pub fn status(&self) -> u16 { self.status }

    /// Reason phrase, if one was set.
    #[must_use]
    pub fn reason(&self) -> Option<&str> { self.reason.as_deref() }

    /// Protocol version without the `HTTP/` prefix.
    #[must_use]
    pub fn version(&self) -> &str { &self.version }

    /// Ordered headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// Mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap { &mut self.headers }

    /// Body stream.
    #[must_use]
    pub fn body(&self) -> &dyn Body { self.body.as_ref() }

    /// Mutable access to the body stream.
    pub fn body_mut(&mut self) -> &mut dyn Body { self.body.as_mut() }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_response_defaults() {
        let response = Response::new(204);
        assert_eq!(response.version(), DEFAULT_PROTOCOL_VERSION);
        assert_eq!(response.reason(), None);
        assert!(response.headers().is_empty());
        assert!(response.body().eof());
    }

    #[test]
    fn headers_mut_edits_in_place() {
        let mut response = Response::new(200)
            .with_header("content-type", "text/plain")
            .with_header("x-trace", "1");

        response.headers_mut().insert("Content-Type", "text/html");
        response.headers_mut().remove("X-TRACE");

        assert_eq!(response.headers().len(), 1);
        assert_eq!(
            response.headers().get("content-type"),
            Some(&["text/html".to_owned()][..])
        );
    }
}
