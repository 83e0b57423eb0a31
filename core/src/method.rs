//! Method matcher.

use crate::{describe, matcher, SharedMatcher, PRIORITY_METHOD};

/// Match when the request method is one of `methods`.
///
/// Methods are upper-cased; the request method is compared as received.
/// Priority is always [`PRIORITY_METHOD`]. Empty input → `None`.
///
/// ```
/// use reqmatch::{method, HttpRequest, Matcher};
///
/// let m = method(["get", "post"]).unwrap();
/// assert!(m.matches(&HttpRequest::builder().method("POST").build()));
/// assert!(!m.matches(&HttpRequest::builder().method("PUT").build()));
/// assert_eq!(m.to_string(), "Method(`GET`,`POST`)");
/// ```
pub fn method<I>(methods: I) -> Option<SharedMatcher>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut methods: Vec<String> = methods
        .into_iter()
        .map(|m| m.as_ref().to_uppercase())
        .collect();
    let description = describe::values("Method", &methods);

    match methods.len() {
        0 => None,
        1 => {
            let expected = methods.swap_remove(0);
            Some(matcher::new(PRIORITY_METHOD, description, move |r| {
                r.method() == expected
            }))
        }
        _ => Some(matcher::new(PRIORITY_METHOD, description, move |r| {
            methods.iter().any(|m| m == r.method())
        })),
    }
}
