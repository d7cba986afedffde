use std::fmt::{self, Debug, Formatter};

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::matching::Matcher;
use crate::{Response, async_trait};

/// Matcher asserting on the full header set of a response.
///
/// Comparison is order-independent and keeps duplicate names as distinct
/// entries, so two `set-cookie` headers never collapse into one.
pub struct HasHeaders {
    expect: Expect,
}

enum Expect {
    Entries(HeaderMap),
    Predicate(Box<dyn Fn(&HeaderMap) -> bool + Send + Sync>),
}

impl HasHeaders {
    /// Expects the response headers to equal `expected` as an unordered
    /// multiset of name/value entries.
    ///
    /// # Panics
    ///
    /// Panics if an entry is not a valid header name or value.
    pub fn new<I, N, V>(expected: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
    {
        let mut entries = HeaderMap::new();
        for (name, value) in expected {
            let Ok(name) = name.try_into() else {
                panic!("invalid expected header name");
            };
            let Ok(value) = value.try_into() else {
                panic!("invalid expected header value");
            };
            entries.append(name, value);
        }
        Self {
            expect: Expect::Entries(entries),
        }
    }

    /// Expects the response headers to satisfy an arbitrary predicate.
    pub fn satisfying<F>(predicate: F) -> Self
    where
        F: Fn(&HeaderMap) -> bool + Send + Sync + 'static,
    {
        Self {
            expect: Expect::Predicate(Box::new(predicate)),
        }
    }
}

/// Header entries sorted by name and value, so two maps compare as multisets.
fn sorted_entries(headers: &HeaderMap) -> Vec<(&str, &[u8])> {
    let mut entries = headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_bytes()))
        .collect::<Vec<_>>();
    entries.sort_unstable();
    entries
}

#[async_trait]
impl Matcher for HasHeaders {
    async fn matches(&self, res: &mut Response) -> bool {
        match &self.expect {
            Expect::Entries(expected) => sorted_entries(expected) == sorted_entries(res.headers()),
            Expect::Predicate(predicate) => predicate(res.headers()),
        }
    }

    async fn mismatch(&self, res: &mut Response) -> Option<String> {
        match &self.expect {
            Expect::Entries(expected) => {
                if sorted_entries(expected) == sorted_entries(res.headers()) {
                    None
                } else {
                    Some(format!(
                        "expected headers {expected:?}, got {:?}",
                        res.headers()
                    ))
                }
            }
            Expect::Predicate(predicate) => {
                if predicate(res.headers()) {
                    None
                } else {
                    Some(format!(
                        "headers {:?} did not satisfy the predicate",
                        res.headers()
                    ))
                }
            }
        }
    }
}

impl Debug for HasHeaders {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.expect {
            Expect::Entries(expected) => f
                .debug_struct("HasHeaders")
                .field("expected", expected)
                .finish(),
            Expect::Predicate(_) => f
                .debug_struct("HasHeaders")
                .field("expected", &"<predicate>")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn matches_headers_in_any_order() {
        let mut res = Response::new();
        res.add_header("Content-Type", "application/json", false)
            .unwrap();
        res.add_header("Content-Length", "123", false).unwrap();
        let matcher = HasHeaders::new([
            ("Content-Length", "123"),
            ("Content-Type", "application/json"),
        ]);
        assert!(matcher.matches(&mut res).await);
    }

    #[tokio::test]
    async fn order_of_emission_is_irrelevant() {
        let entries = [("x-a", "1"), ("x-b", "2"), ("x-c", "3")];
        let perms: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        let matcher = HasHeaders::new(entries);
        for perm in perms {
            let mut res = Response::new();
            for idx in perm {
                let (name, value) = entries[idx];
                res.add_header(name, value, false).unwrap();
            }
            assert!(matcher.matches(&mut res).await);
        }
    }

    #[tokio::test]
    async fn rejects_a_response_without_the_expected_header() {
        let mut res = Response::new();
        let matcher = HasHeaders::new([("X-My-Header", "value")]);
        assert!(!matcher.matches(&mut res).await);
        assert!(matcher.mismatch(&mut res).await.is_some());
    }

    #[tokio::test]
    async fn rejects_subset_superset_and_disjoint_sets() {
        let mut res = Response::new();
        res.add_header("x-a", "1", false).unwrap();
        res.add_header("x-b", "2", false).unwrap();
        // actual is a strict subset of expected
        let superset = HasHeaders::new([("x-a", "1"), ("x-b", "2"), ("x-c", "3")]);
        assert!(!superset.matches(&mut res).await);
        // actual is a strict superset of expected
        let subset = HasHeaders::new([("x-a", "1")]);
        assert!(!subset.matches(&mut res).await);
        // disjoint
        let disjoint = HasHeaders::new([("x-c", "3")]);
        assert!(!disjoint.matches(&mut res).await);
    }

    #[tokio::test]
    async fn empty_expectation_matches_a_bare_response() {
        let mut res = Response::new();
        let matcher = HasHeaders::new::<_, HeaderName, HeaderValue>([]);
        assert!(matcher.matches(&mut res).await);
        res.add_header("x-a", "1", false).unwrap();
        assert!(!matcher.matches(&mut res).await);
    }

    #[tokio::test]
    async fn duplicate_names_are_distinct_entries() {
        let mut res = Response::new();
        res.add_header("set-cookie", "a=1", false).unwrap();
        res.add_header("set-cookie", "b=2", false).unwrap();
        let matcher = HasHeaders::new([("set-cookie", "b=2"), ("set-cookie", "a=1")]);
        assert!(matcher.matches(&mut res).await);
        assert!(!HasHeaders::new([("set-cookie", "a=1")]).matches(&mut res).await);
    }

    #[tokio::test]
    async fn predicate_expectations_see_the_actual_headers() {
        let mut res = Response::new();
        res.add_header("x-request-id", "abc123", false).unwrap();
        let matcher = HasHeaders::satisfying(|headers| headers.contains_key("x-request-id"));
        assert!(matcher.matches(&mut res).await);
        let missing = HasHeaders::satisfying(|headers| headers.contains_key("x-trace-id"));
        assert!(!missing.matches(&mut res).await);
        assert!(missing.mismatch(&mut res).await.is_some());
    }

    #[tokio::test]
    async fn matching_is_repeatable() {
        let mut res = Response::new();
        res.add_header("x-a", "1", false).unwrap();
        let matcher = HasHeaders::new([("x-a", "1")]);
        assert!(matcher.matches(&mut res).await);
        assert!(matcher.matches(&mut res).await);
    }
}
