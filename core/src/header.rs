//! Header matchers.

use crate::{describe, matcher, HttpRequest, SharedMatcher, PRIORITY_HEADER};
use http::header::HeaderName;
use std::collections::BTreeMap;

/// One required header: presence only when `value` is empty, otherwise one of
/// the header's values must equal `value` exactly.
#[derive(Debug, Clone)]
struct HeaderCondition {
    // `None` when the key is not a valid header name and can never be present.
    name: Option<HeaderName>,
    value: String,
}

impl HeaderCondition {
    fn new(key: &str, value: String) -> Self {
        Self {
            name: HeaderName::from_bytes(key.as_bytes()).ok(),
            value,
        }
    }

    fn matches(&self, request: &HttpRequest) -> bool {
        let Some(name) = &self.name else {
            return false;
        };
        let headers = request.headers();
        if self.value.is_empty() {
            return headers.contains_key(name);
        }
        headers
            .get_all(name)
            .iter()
            .any(|v| v.as_bytes() == self.value.as_bytes())
    }
}

/// Canonical MIME header casing: the first letter and every letter after a
/// `-` upper-cased, the rest lower-cased.
///
/// Keys containing characters outside the HTTP token set are returned
/// unchanged.
///
/// ```
/// use reqmatch::canonical_header_key;
///
/// assert_eq!(canonical_header_key("content-type"), "Content-Type");
/// assert_eq!(canonical_header_key("X-FORWARDED-FOR"), "X-Forwarded-For");
/// assert_eq!(canonical_header_key("bad key"), "bad key");
/// ```
#[must_use]
pub fn canonical_header_key(key: &str) -> String {
    if !key.bytes().all(is_token_byte) {
        return key.to_string();
    }
    let mut upper = true;
    key.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Match when the request carries header `key` with `value`.
///
/// The key is matched case-insensitively; the value exactly. An empty value
/// only requires the header to be present. Priority is [`PRIORITY_HEADER`].
/// Empty key → `None`.
///
/// ```
/// use reqmatch::{header, HttpRequest, Matcher};
///
/// let m = header("content-type", "text/html").unwrap();
/// assert_eq!(m.to_string(), "Header(`Content-Type`,`text/html`)");
///
/// let html = HttpRequest::builder().header("CONTENT-TYPE", "text/html").build();
/// let json = HttpRequest::builder().header("Content-Type", "application/json").build();
/// assert!(m.matches(&html));
/// assert!(!m.matches(&json));
/// ```
#[must_use]
pub fn header(key: &str, value: &str) -> Option<SharedMatcher> {
    if key.is_empty() {
        return None;
    }
    let key = canonical_header_key(key);
    let description = describe::kv("Header", &key, value);
    let condition = HeaderCondition::new(&key, value.to_string());
    Some(matcher::new(PRIORITY_HEADER, description, move |r| {
        condition.matches(r)
    }))
}

/// Match when the request carries every `(key, value)` pair.
///
/// Same per-pair semantics as [`header`]. Keys are canonicalized first, so
/// pairs differing only in key case collapse to the last one given. Priority is
/// [`PRIORITY_HEADER`] × the number of pairs. Empty input → `None`.
///
/// ```
/// use reqmatch::{headerm, HttpRequest, Matcher};
///
/// let m = headerm([("x-b", "2"), ("x-a", "")]).unwrap();
/// assert_eq!(m.to_string(), "(Header(`X-A`) && Header(`X-B`,`2`))");
/// assert_eq!(m.priority(), 8);
///
/// let req = HttpRequest::builder().header("X-A", "any").header("X-B", "2").build();
/// assert!(m.matches(&req));
/// ```
pub fn headerm<I, K, V>(pairs: I) -> Option<SharedMatcher>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let headers: BTreeMap<String, String> = pairs
        .into_iter()
        .map(|(k, v)| (canonical_header_key(k.as_ref()), v.as_ref().to_string()))
        .collect();
    if headers.is_empty() {
        return None;
    }

    let description = describe::kvs("Header", &headers);
    let priority = PRIORITY_HEADER * headers.len();
    let conditions: Vec<HeaderCondition> = headers
        .into_iter()
        .map(|(k, v)| HeaderCondition::new(&k, v))
        .collect();

    Some(matcher::new(priority, description, move |r| {
        conditions.iter().all(|c| c.matches(r))
    }))
}
