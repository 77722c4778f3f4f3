//! Test doubles and fixtures for exercising
//! [`ResponseEmitter`](emitframe::ResponseEmitter).
//!
//! ```rust
//! use emitframe::{MemoryChannel, ResponseEmitter};
//! use emitframe_testing::{CountingHandler, sample_response};
//!
//! # async fn example() {
//! let handler = CountingHandler::new(sample_response);
//! let mut channel = MemoryChannel::new();
//! let response = ResponseEmitter::new()
//!     .process((), &handler, &mut channel)
//!     .await
//!     .unwrap();
//! assert_eq!(handler.calls(), 1);
//! # let _ = response;
//! # }
//! ```

pub mod doubles;
pub mod logging;
pub mod metrics;

pub use doubles::{CountingHandler, HandlerFailed, RecordingEmitter, payload, sample_response};
pub use logging::{LoggerHandle, logger};
pub use metrics::{counter_value, with_recorder};
