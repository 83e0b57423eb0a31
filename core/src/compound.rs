//! AND / OR composition over matchers.
//!
//! Children are stable-sorted by descending priority before anything else is
//! derived from them, so the description (and evaluation order) depends only on
//! the multiset of children and their insertion order among equal priorities.

use crate::{describe, matcher, HttpRequest, Matcher, SharedMatcher};
use std::sync::Arc;

/// The boolean connective of a [`Compound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Combinator {
    /// All children must match. Priority is the sum of the children,
    /// saturating at `usize::MAX`.
    And,
    /// Any child must match. Priority is the maximum of the children.
    Or,
}

impl Combinator {
    /// Separator used between children in the description.
    #[must_use]
    pub fn separator(self) -> &'static str {
        match self {
            Self::And => " && ",
            Self::Or => " || ",
        }
    }

    fn priority(self, children: &[SharedMatcher]) -> usize {
        let priorities = children.iter().map(|m| m.priority());
        match self {
            Self::And => priorities.fold(0, usize::saturating_add),
            Self::Or => priorities.max().unwrap_or(0),
        }
    }
}

/// Composite matcher built by [`and`] or [`or`] from two or more children.
#[derive(Debug)]
pub struct Compound {
    combinator: Combinator,
    children: Vec<SharedMatcher>,
    priority: usize,
    description: String,
}

impl Compound {
    /// Build a compound without the shortcuts [`and`] and [`or`] take.
    ///
    /// Evaluation agrees with those functions for any number of children: an
    /// empty AND never matches and an empty OR always does.
    #[must_use]
    pub fn new(combinator: Combinator, mut children: Vec<SharedMatcher>) -> Self {
        sort(&mut children);
        let priority = combinator.priority(&children);
        let description = describe::join(combinator.separator(), &children);
        tracing::trace!(
            ?combinator,
            children = children.len(),
            priority,
            "built compound matcher"
        );
        Self {
            combinator,
            children,
            priority,
            description,
        }
    }

    /// The connective joining the children.
    #[must_use]
    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// The children, in evaluation (descending priority) order.
    #[must_use]
    pub fn children(&self) -> &[SharedMatcher] {
        &self.children
    }
}

impl Matcher for Compound {
    fn matches(&self, request: &HttpRequest) -> bool {
        match self.combinator {
            Combinator::And => {
                !self.children.is_empty() && self.children.iter().all(|m| m.matches(request))
            }
            Combinator::Or => {
                self.children.is_empty() || self.children.iter().any(|m| m.matches(request))
            }
        }
    }

    fn priority(&self) -> usize {
        self.priority
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Sort matchers by priority, highest first.
///
/// The sort is stable: matchers with equal priority keep their relative order.
pub fn sort(matchers: &mut [SharedMatcher]) {
    matchers.sort_by(|a, b| b.priority().cmp(&a.priority()));
}

/// Combine matchers with AND semantics.
///
/// - Empty → a matcher that never matches (no condition configured = deny)
/// - Single → returned unchanged (no wrapping overhead)
/// - Multiple → [`Compound`] with the summed priority and
///   `(c1 && c2 && ...)` description, short-circuiting on the first miss
///
/// `Option<SharedMatcher>` is itself iterable, so the `None` results of the
/// primitive constructors can be dropped with `.flatten()`.
///
/// ```
/// use reqmatch::prelude::*;
///
/// let m = and([method(["POST"]), path_prefix(["/api"])].into_iter().flatten());
/// assert_eq!(m.to_string(), "(PathPrefix(`/api`) && Method(`POST`))");
/// assert_eq!(m.priority(), 50 * 4 + 40);
///
/// assert!(!and([]).matches(&HttpRequest::default()));
/// ```
pub fn and(matchers: impl IntoIterator<Item = SharedMatcher>) -> SharedMatcher {
    compose(Combinator::And, matchers)
}

/// Combine matchers with OR semantics.
///
/// - Empty → a matcher that matches everything
/// - Single → returned unchanged
/// - Multiple → [`Compound`] with the maximum priority and
///   `(c1 || c2 || ...)` description, short-circuiting on the first hit
///
/// ```
/// use reqmatch::prelude::*;
///
/// let m = or([host(["a.example.com"]), host(["b.example.com"])].into_iter().flatten());
/// let request = HttpRequest::builder().host("b.example.com").build();
/// assert!(m.matches(&request));
///
/// assert!(or([]).matches(&HttpRequest::default()));
/// ```
pub fn or(matchers: impl IntoIterator<Item = SharedMatcher>) -> SharedMatcher {
    compose(Combinator::Or, matchers)
}

fn compose(
    combinator: Combinator,
    matchers: impl IntoIterator<Item = SharedMatcher>,
) -> SharedMatcher {
    let mut children: Vec<SharedMatcher> = matchers.into_iter().collect();
    match children.len() {
        0 => match combinator {
            Combinator::And => matcher::always_false(),
            Combinator::Or => matcher::always_true(),
        },
        1 => children.swap_remove(0),
        _ => Arc::new(Compound::new(combinator, children)),
    }
}
