//! Path and path-prefix matchers.

use crate::{describe, matcher, Extractors, SharedMatcher, PRIORITY_PATH, PRIORITY_PATH_PREFIX};

/// Canonicalize a path: trailing `/` are trimmed, an empty result becomes `/`.
///
/// Idempotent: `fix_path(&fix_path(p)) == fix_path(p)`.
///
/// ```
/// use reqmatch::fix_path;
///
/// assert_eq!(fix_path("/a/b/"), "/a/b");
/// assert_eq!(fix_path("///"), "/");
/// assert_eq!(fix_path(""), "/");
/// ```
#[must_use]
pub fn fix_path(path: &str) -> String {
    match path.trim_end_matches('/') {
        "" => "/".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Match when the (canonical) request path equals one of `paths`.
///
/// Paths are canonicalized with [`fix_path`]. Priority is
/// [`PRIORITY_PATH`] × the longest canonical path. Empty input → `None`.
///
/// ```
/// use reqmatch::{path, HttpRequest, Matcher};
///
/// let m = path(["/path/to/", "/other"]).unwrap();
/// assert_eq!(m.to_string(), "Path(`/path/to`,`/other`)");
/// assert!(m.matches(&HttpRequest::builder().path("/path/to").build()));
/// assert!(!m.matches(&HttpRequest::builder().path("/path").build()));
/// ```
pub fn path<I>(paths: I) -> Option<SharedMatcher>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    path_with(&Extractors::default(), paths)
}

pub(crate) fn path_with<I>(extractors: &Extractors, paths: I) -> Option<SharedMatcher>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let paths: Vec<String> = paths.into_iter().map(|p| fix_path(p.as_ref())).collect();
    let longest = paths.iter().map(String::len).max()?;
    let description = describe::values("Path", &paths);
    let get_path = extractors.path_fn();

    Some(matcher::new(
        PRIORITY_PATH * longest,
        description,
        move |r| {
            let current = get_path(r);
            paths.iter().any(|p| *p == current)
        },
    ))
}

/// Match when the request path starts with one of `prefixes` on a segment
/// boundary.
///
/// `/foo` matches `/foo` and `/foo/bar` but not `/foobar`. A prefix of `/`
/// matches every request. Priority is [`PRIORITY_PATH_PREFIX`] × the longest
/// canonical prefix. Empty input → `None`.
///
/// ```
/// use reqmatch::{path_prefix, HttpRequest, Matcher};
///
/// let m = path_prefix(["/path"]).unwrap();
/// let at = |p: &str| HttpRequest::builder().path(p).build();
/// assert!(m.matches(&at("/path")));
/// assert!(m.matches(&at("/path/to")));
/// assert!(!m.matches(&at("/pathto")));
/// ```
pub fn path_prefix<I>(prefixes: I) -> Option<SharedMatcher>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    path_prefix_with(&Extractors::default(), prefixes)
}

pub(crate) fn path_prefix_with<I>(extractors: &Extractors, prefixes: I) -> Option<SharedMatcher>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let prefixes: Vec<String> = prefixes
        .into_iter()
        .map(|p| fix_path(p.as_ref()))
        .collect();
    let longest = prefixes.iter().map(String::len).max()?;
    let description = describe::values("PathPrefix", &prefixes);
    let priority = PRIORITY_PATH_PREFIX * longest;

    if prefixes.iter().any(|p| p == "/") {
        return Some(matcher::new(priority, description, |_| true));
    }

    let get_path = extractors.path_fn();
    Some(matcher::new(priority, description, move |r| {
        let current = get_path(r);
        prefixes.iter().any(|p| has_path_prefix(&current, p))
    }))
}

/// `path` starts with `prefix` and the match ends on a segment boundary.
fn has_path_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
