//! `Matcher`: The request predicate abstraction
//!
//! Every matcher exposes three facets: whether it matches a request, how
//! specific it is, and how it describes itself. Primitive constructors
//! ([`host`](crate::host), [`path`](crate::path), ...) all produce an
//! [`FnMatcher`]; [`and`](crate::and) and [`or`](crate::or) produce a
//! [`Compound`](crate::Compound).

use crate::HttpRequest;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A predicate over an [`HttpRequest`] with a specificity weight and a
/// canonical description.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Matchers are immutable after
/// construction and evaluated concurrently without locking.
///
/// # Example
///
/// ```
/// use reqmatch::{HttpRequest, Matcher};
///
/// let get = reqmatch::method(["get"]).unwrap();
/// let request = HttpRequest::builder().method("GET").build();
///
/// assert!(get.matches(&request));
/// assert_eq!(get.priority(), reqmatch::PRIORITY_METHOD);
/// assert_eq!(get.description(), "Method(`GET`)");
/// ```
pub trait Matcher: Send + Sync + Debug {
    /// Check whether the request satisfies this matcher.
    ///
    /// Must be free of side effects other than diagnostic logging.
    fn matches(&self, request: &HttpRequest) -> bool;

    /// Relative specificity. Only meaningful when compared with other matchers.
    fn priority(&self) -> usize;

    /// Canonical description, computed once at construction.
    fn description(&self) -> &str;
}

impl fmt::Display for dyn Matcher + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A shareable, type-erased matcher.
///
/// Combinators take ownership of their children, so callers that reuse a
/// matcher in several compositions clone the `Arc`.
pub type SharedMatcher = Arc<dyn Matcher>;

type MatchFn = dyn Fn(&HttpRequest) -> bool + Send + Sync;

/// A primitive matcher: a match function with a fixed priority and description.
pub struct FnMatcher {
    priority: usize,
    description: String,
    matcher: Box<MatchFn>,
}

impl FnMatcher {
    /// Create a matcher from a match function.
    pub fn new<F>(priority: usize, description: impl Into<String>, matcher: F) -> Self
    where
        F: Fn(&HttpRequest) -> bool + Send + Sync + 'static,
    {
        Self {
            priority,
            description: description.into(),
            matcher: Box::new(matcher),
        }
    }
}

impl Matcher for FnMatcher {
    fn matches(&self, request: &HttpRequest) -> bool {
        (self.matcher)(request)
    }

    fn priority(&self) -> usize {
        self.priority
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Debug for FnMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMatcher")
            .field("priority", &self.priority)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Create a custom [`SharedMatcher`] from a match function.
///
/// ```
/// use reqmatch::{HttpRequest, Matcher};
///
/// let has_body = reqmatch::new(3, "HasBody()", |r: &HttpRequest| {
///     r.header("content-length").is_some_and(|v| v != "0")
/// });
/// let request = HttpRequest::builder().header("Content-Length", "12").build();
///
/// assert!(has_body.matches(&request));
/// assert_eq!(has_body.to_string(), "HasBody()");
/// ```
pub fn new<F>(priority: usize, description: impl Into<String>, matcher: F) -> SharedMatcher
where
    F: Fn(&HttpRequest) -> bool + Send + Sync + 'static,
{
    Arc::new(FnMatcher::new(priority, description, matcher))
}

/// A matcher that accepts every request (priority 0, empty description).
#[must_use]
pub fn always_true() -> SharedMatcher {
    new(0, "", |_| true)
}

/// A matcher that rejects every request (priority 0, empty description).
#[must_use]
pub fn always_false() -> SharedMatcher {
    new(0, "", |_| false)
}
