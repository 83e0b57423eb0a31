//! Host matcher.

use crate::{describe, matcher, Extractors, SharedMatcher, PRIORITY_HOST};

/// A single configured host.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HostPattern {
    /// `*`
    Any,
    /// `*.example.com` → `.example.com`
    Suffix(String),
    /// `www.example.com`
    Exact(String),
}

impl HostPattern {
    fn parse(host: &str) -> Self {
        match host {
            "*" => Self::Any,
            _ => match host.strip_prefix('*') {
                Some(suffix) => Self::Suffix(suffix.to_string()),
                None => Self::Exact(host.to_string()),
            },
        }
    }

    fn matches(&self, host: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Suffix(suffix) => host.ends_with(suffix.as_str()),
            Self::Exact(expected) => host == expected,
        }
    }
}

/// Match when the request host is one of `hosts`.
///
/// Hosts are lower-cased. Each entry is an exact domain
/// (`www.example.com`), a leading-wildcard domain (`*.example.com`, matching
/// any host ending in `.example.com`) or `*` (any host). Priority is
/// [`PRIORITY_HOST`] × the longest host, wildcard included. Empty input → `None`.
///
/// ```
/// use reqmatch::{host, HttpRequest, Matcher};
///
/// let m = host(["*.Example.com", "example.org"]).unwrap();
/// let at = |h: &str| HttpRequest::builder().host(h).build();
///
/// assert!(m.matches(&at("api.example.com:8443")));
/// assert!(m.matches(&at("EXAMPLE.org")));
/// assert!(!m.matches(&at("example.net")));
/// assert_eq!(m.to_string(), "Host(`*.example.com`,`example.org`)");
/// ```
pub fn host<I>(hosts: I) -> Option<SharedMatcher>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    host_with(&Extractors::default(), hosts)
}

pub(crate) fn host_with<I>(extractors: &Extractors, hosts: I) -> Option<SharedMatcher>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let hosts: Vec<String> = hosts
        .into_iter()
        .map(|h| h.as_ref().to_lowercase())
        .collect();
    let longest = hosts.iter().map(String::len).max()?;
    let description = describe::values("Host", &hosts);
    let patterns: Vec<HostPattern> = hosts.iter().map(|h| HostPattern::parse(h)).collect();
    let get_host = extractors.host_fn();

    Some(matcher::new(
        PRIORITY_HOST * longest,
        description,
        move |r| {
            let current = get_host(r);
            patterns.iter().any(|p| p.matches(&current))
        },
    ))
}
