//! Matchers for asserting on HTTP responses in tests.
//!
//! A [`Response`] carries a status code, a header map and a lazily chunked
//! body. Matchers decide whether a response satisfies an expectation:
//! [`HasHeaders`] compares the header set order-independently, [`HasBody`]
//! drains the chunked body and compares the concatenated bytes, and
//! [`HasStatus`] checks the status code. Body draining is replayable, so the
//! same response can be matched any number of times.
//!
//! ```
//! use retort::{HasBody, HasHeaders, Matcher, ResBody, Response};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let mut res = Response::new();
//! res.add_header("content-type", "application/json", true).unwrap();
//! res.body(ResBody::chunks(["chunk1", "chunk2"]));
//!
//! assert!(HasHeaders::new([("content-type", "application/json")]).matches(&mut res).await);
//! assert!(HasBody::new("chunk1chunk2").matches(&mut res).await);
//! // The drained bytes are put back, so matching again sees the same body.
//! assert!(HasBody::new("chunk1chunk2").matches(&mut res).await);
//! # });
//! ```

pub use async_trait::async_trait;

mod body;
mod error;
pub mod matching;
mod response;

pub use self::body::ResBody;
pub use self::error::{BoxedError, Error};
pub use self::matching::{HasBody, HasHeaders, HasStatus, Matcher, assert_matches};
pub use self::response::Response;

/// Result type which has [`Error`] as its error type.
pub type Result<T> = std::result::Result<T, Error>;
