use std::error::Error as StdError;
use std::string::FromUtf8Error;
use std::time::Duration;

/// Boxed error type carried by body streams.
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Errors raised while reading data from a response.
///
/// A plain mismatch is never an error: matchers report it as `false`. These
/// errors mean the response itself is malformed, a failed stream mostly.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The body stream failed before it completed.
    #[error("body stream failed: {0}")]
    Stream(BoxedError),

    /// The body stream did not complete within the drain deadline.
    #[error("body not drained within {0:?}")]
    DrainTimeout(Duration),

    /// The body bytes are not valid UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Custom error that does not fall under any other error kind.
    #[error("{0}")]
    Other(BoxedError),
}

impl Error {
    /// Create a custom error.
    pub fn other(error: impl Into<BoxedError>) -> Self {
        Self::Other(error.into())
    }
}
