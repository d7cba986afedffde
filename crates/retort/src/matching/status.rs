use http::StatusCode;

use crate::matching::Matcher;
use crate::{Response, async_trait};

/// Matcher asserting on the status code of a response.
#[derive(Clone, Copy, Debug)]
pub struct HasStatus {
    expected: StatusCode,
}

impl HasStatus {
    /// Expects the response status code to equal `expected`.
    pub fn new(expected: StatusCode) -> Self {
        Self { expected }
    }
}

#[async_trait]
impl Matcher for HasStatus {
    async fn matches(&self, res: &mut Response) -> bool {
        res.status_code == Some(self.expected)
    }

    async fn mismatch(&self, res: &mut Response) -> Option<String> {
        if res.status_code == Some(self.expected) {
            None
        } else {
            Some(format!(
                "expected status {}, got {:?}",
                self.expected, res.status_code
            ))
        }
    }
}
