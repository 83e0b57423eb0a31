//! Query parameter matchers.

use crate::{describe, matcher, HttpRequest, SharedMatcher, PRIORITY_QUERY};
use std::borrow::Cow;
use std::collections::BTreeMap;

type Pairs<'a> = [(Cow<'a, str>, Cow<'a, str>)];

/// Key present, and when `value` is non-empty, some value for `key` equals it.
fn has_pair(pairs: &Pairs<'_>, key: &str, value: &str) -> bool {
    pairs
        .iter()
        .any(|(k, v)| k == key && (value.is_empty() || v == value))
}

/// Match when the decoded query string has `key` with `value`.
///
/// Both key and value are compared exactly. An empty value only requires the
/// key to be present. Priority is [`PRIORITY_QUERY`]. Empty key → `None`.
///
/// ```
/// use reqmatch::{query, HttpRequest, Matcher};
///
/// let m = query("page", "2").unwrap();
/// assert_eq!(m.to_string(), "Query(`page`,`2`)");
/// assert!(m.matches(&HttpRequest::builder().target("/list?page=2").build()));
/// assert!(!m.matches(&HttpRequest::builder().target("/list?Page=2").build()));
/// ```
#[must_use]
pub fn query(key: &str, value: &str) -> Option<SharedMatcher> {
    if key.is_empty() {
        return None;
    }
    let description = describe::kv("Query", key, value);
    let (key, value) = (key.to_string(), value.to_string());
    Some(matcher::new(PRIORITY_QUERY, description, move |r| {
        has_pair(&r.query_pairs(), &key, &value)
    }))
}

/// Match when the decoded query string has every `(key, value)` pair.
///
/// Same per-pair semantics as [`query`]. Priority is [`PRIORITY_QUERY`] × the
/// number of pairs. Empty input → `None`.
///
/// ```
/// use reqmatch::{querym, HttpRequest, Matcher};
///
/// let m = querym([("a", "1"), ("b", "")]).unwrap();
/// assert_eq!(m.to_string(), "(Query(`a`,`1`) && Query(`b`))");
/// assert!(m.matches(&HttpRequest::builder().query("b&a=1").build()));
/// assert!(!m.matches(&HttpRequest::builder().query("a=1").build()));
/// ```
pub fn querym<I, K, V>(pairs: I) -> Option<SharedMatcher>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let required: BTreeMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();
    if required.is_empty() {
        return None;
    }

    let description = describe::kvs("Query", &required);
    let priority = PRIORITY_QUERY * required.len();
    Some(matcher::new(priority, description, move |r: &HttpRequest| {
        let pairs = r.query_pairs();
        required.iter().all(|(k, v)| has_pair(&pairs, k, v))
    }))
}
