//! Matchers for asserting on [`Response`] values in tests.

mod body;
mod headers;
mod status;

pub use body::HasBody;
pub use headers::HasHeaders;
pub use status::HasStatus;

use crate::{Response, async_trait};

/// A predicate over a candidate [`Response`].
///
/// Matchers are re-evaluable: calling [`matches`](Matcher::matches) any
/// number of times against the same response observes the same result, body
/// draining included.
#[async_trait]
pub trait Matcher: Send + Sync {
    /// Decides whether `res` satisfies this matcher.
    async fn matches(&self, res: &mut Response) -> bool;

    /// Describes why `res` fails this matcher, or `None` when it matches.
    async fn mismatch(&self, res: &mut Response) -> Option<String>;
}

/// Asserts that `res` satisfies `matcher`.
///
/// Panics with the matcher's mismatch description otherwise, which is how a
/// failure surfaces to the enclosing test.
pub async fn assert_matches<M>(matcher: &M, res: &mut Response)
where
    M: Matcher + ?Sized,
{
    if let Some(reason) = matcher.mismatch(res).await {
        panic!("response mismatch: {reason}");
    }
}
