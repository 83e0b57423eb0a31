//! `Factory`: primitive constructors bound to a set of [`Extractors`].

use crate::{addr, header, host, method, path, query, Extractors, MatcherError, SharedMatcher};

/// Builds primitive matchers that read requests through the given
/// [`Extractors`].
///
/// The crate-level constructors ([`host`](crate::host), [`client_ip`](crate::client_ip),
/// ...) are shorthands for `Factory::default()`.
///
/// ```
/// use reqmatch::{Extractors, Factory, HttpRequest, Matcher};
///
/// // Route on a tenant header instead of the authority.
/// let factory = Factory::new(Extractors::default().with_host(|r: &HttpRequest| {
///     r.header("x-tenant").unwrap_or_default().to_ascii_lowercase()
/// }));
///
/// let m = factory.host(["acme"]).unwrap();
/// let request = HttpRequest::builder().host("shared.example.com").header("X-Tenant", "ACME").build();
/// assert!(m.matches(&request));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Factory {
    extractors: Extractors,
}

impl Factory {
    /// Create a factory using `extractors`.
    #[must_use]
    pub fn new(extractors: Extractors) -> Self {
        Self { extractors }
    }

    /// The extractors captured by matchers built from this factory.
    #[must_use]
    pub fn extractors(&self) -> &Extractors {
        &self.extractors
    }

    /// See [`host`](crate::host).
    pub fn host<I>(&self, hosts: I) -> Option<SharedMatcher>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        host::host_with(&self.extractors, hosts)
    }

    /// See [`path`](crate::path).
    pub fn path<I>(&self, paths: I) -> Option<SharedMatcher>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        path::path_with(&self.extractors, paths)
    }

    /// See [`path_prefix`](crate::path_prefix).
    pub fn path_prefix<I>(&self, prefixes: I) -> Option<SharedMatcher>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        path::path_prefix_with(&self.extractors, prefixes)
    }

    /// See [`method`](crate::method).
    pub fn method<I>(&self, methods: I) -> Option<SharedMatcher>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        method::method(methods)
    }

    /// See [`header`](crate::header).
    #[must_use]
    pub fn header(&self, key: &str, value: &str) -> Option<SharedMatcher> {
        header::header(key, value)
    }

    /// See [`headerm`](crate::headerm).
    pub fn headerm<I, K, V>(&self, pairs: I) -> Option<SharedMatcher>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        header::headerm(pairs)
    }

    /// See [`query`](crate::query).
    #[must_use]
    pub fn query(&self, key: &str, value: &str) -> Option<SharedMatcher> {
        query::query(key, value)
    }

    /// See [`querym`](crate::querym).
    pub fn querym<I, K, V>(&self, pairs: I) -> Option<SharedMatcher>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        query::querym(pairs)
    }

    /// See [`client_ip`](crate::client_ip).
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidIp`] if any entry fails to parse.
    pub fn client_ip<I>(&self, ips: I) -> Result<Option<SharedMatcher>, MatcherError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        addr::client_ip_with(&self.extractors, ips)
    }

    /// See [`server_ip`](crate::server_ip).
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidIp`] if any entry fails to parse.
    pub fn server_ip<I>(&self, ips: I) -> Result<Option<SharedMatcher>, MatcherError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        addr::server_ip_with(&self.extractors, ips)
    }
}
