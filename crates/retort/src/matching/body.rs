use std::time::Duration;

use bytes::Bytes;

use crate::body::ResBody;
use crate::matching::Matcher;
use crate::{Error, Response, async_trait};

/// Matcher asserting that a response body drains to the expected bytes.
///
/// The body chunk sequence is drained fully and concatenated in emission
/// order before comparing, so how the payload was split across chunks never
/// affects the outcome. Draining goes through
/// [`Response::replay_bytes`], which leaves the collected bytes behind as the
/// new body: the same response can be matched again, by this instance or a
/// fresh one, with the same result.
#[derive(Clone, Debug)]
pub struct HasBody {
    expected: Bytes,
    deadline: Option<Duration>,
}

impl HasBody {
    /// Expects the response body to drain to exactly `expected`.
    pub fn new(expected: impl Into<Bytes>) -> Self {
        Self {
            expected: expected.into(),
            deadline: None,
        }
    }

    /// Bounds the drain to `deadline`.
    ///
    /// A body stream that does not complete in time is treated as failed
    /// rather than hanging the test. Without a deadline the test framework's
    /// own timeout is the backstop.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    async fn drain(&self, res: &mut Response) -> crate::Result<Bytes> {
        let Some(deadline) = self.deadline else {
            return res.replay_bytes().await;
        };
        match tokio::time::timeout(deadline, res.replay_bytes()).await {
            Ok(drained) => drained,
            Err(_) => {
                let err = Error::DrainTimeout(deadline);
                res.replace_body(ResBody::Error(err.to_string()));
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Matcher for HasBody {
    async fn matches(&self, res: &mut Response) -> bool {
        match self.drain(res).await {
            Ok(actual) => {
                let matched = actual == self.expected;
                tracing::debug!(
                    expected = self.expected.len(),
                    actual = actual.len(),
                    matched,
                    "drained body for matching"
                );
                matched
            }
            Err(e) => {
                tracing::warn!(error = %e, "treating body drain failure as a mismatch");
                false
            }
        }
    }

    async fn mismatch(&self, res: &mut Response) -> Option<String> {
        match self.drain(res).await {
            Ok(actual) if actual == self.expected => None,
            Ok(actual) => Some(format!(
                "expected body {:?} ({} bytes), got {:?} ({} bytes)",
                String::from_utf8_lossy(&self.expected),
                self.expected.len(),
                String::from_utf8_lossy(&actual),
                actual.len(),
            )),
            Err(e) => Some(format!("body could not be drained: {e}")),
        }
    }
}
