//! `HttpRequest`: The request abstraction matchers evaluate against.
//!
//! Transport glue builds one per incoming request, either through the builder or
//! by converting an [`http::Request`]. Socket addresses are carried as plain
//! strings; turning them into IP addresses is the job of the
//! [`Extractors`](crate::Extractors).

use http::header::{HeaderMap, HeaderName, HeaderValue, HOST};
use std::borrow::Cow;
use std::net::SocketAddr;
use url::form_urlencoded;

/// HTTP request context for matching.
#[derive(Debug, Clone, Default)]
pub struct HttpRequest {
    method: String,
    host: String,
    server_name: Option<String>,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    remote_addr: Option<String>,
    local_addr: Option<String>,
}

impl HttpRequest {
    /// Create a builder for `HttpRequest`.
    #[must_use]
    pub fn builder() -> HttpRequestBuilder {
        HttpRequestBuilder::default()
    }

    /// Get the HTTP method, as received.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request authority (`host` or `host:port`), as received.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the TLS server name (SNI), if the request arrived over TLS.
    #[must_use]
    pub fn server_name(&self) -> Option<&str> {
        self.server_name.as_deref()
    }

    /// Get the request path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the raw query string, without the leading `?`.
    #[must_use]
    pub fn raw_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Get all headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the first value of a header (case-insensitive name).
    ///
    /// Returns `None` if the header is missing or its value is not visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded query pairs, in order of appearance.
    ///
    /// A key without `=` yields an empty value.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
        self.query
            .as_deref()
            .map(|q| form_urlencoded::parse(q.as_bytes()).collect())
            .unwrap_or_default()
    }

    /// Get the remote (client) address, as reported by the transport.
    #[must_use]
    pub fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }

    /// Get the local (server) address, as reported by the transport.
    #[must_use]
    pub fn local_addr(&self) -> Option<&str> {
        self.local_addr.as_deref()
    }
}

/// Builder for `HttpRequest`.
#[derive(Debug, Default)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.request.method = method.into();
        self
    }

    /// Set the request authority (`host` or `host:port`).
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.request.host = host.into();
        self
    }

    /// Set the TLS server name.
    #[must_use]
    pub fn server_name(mut self, server_name: impl Into<String>) -> Self {
        self.request.server_name = Some(server_name.into());
        self
    }

    /// Set the request path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.request.path = path.into();
        self
    }

    /// Set the raw query string (without the leading `?`).
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.request.query = Some(query.into());
        self
    }

    /// Set path and query from a request target such as `/search?q=rust`.
    #[must_use]
    pub fn target(mut self, target: &str) -> Self {
        match target.split_once('?') {
            Some((path, query)) => {
                self.request.path = path.to_string();
                self.request.query = Some(query.to_string());
            }
            None => {
                self.request.path = target.to_string();
                self.request.query = None;
            }
        }
        self
    }

    /// Append a header value.
    ///
    /// Names are case-insensitive. Entries with an invalid name or value are
    /// dropped with a warning.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let (name, value) = (name.as_ref(), value.as_ref());
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.request.headers.append(name, value);
            }
            _ => tracing::warn!(header = name, "dropping invalid header"),
        }
        self
    }

    /// Set the remote (client) address, e.g. `"127.0.0.1:4321"`.
    #[must_use]
    pub fn remote_addr(mut self, addr: impl ToString) -> Self {
        self.request.remote_addr = Some(addr.to_string());
        self
    }

    /// Set the local (server) address, e.g. `"10.0.0.1:443"`.
    #[must_use]
    pub fn local_addr(mut self, addr: impl ToString) -> Self {
        self.request.local_addr = Some(addr.to_string());
        self
    }

    /// Build the `HttpRequest`.
    #[must_use]
    pub fn build(self) -> HttpRequest {
        self.request
    }
}

/// Remote peer address, stored in [`http::Request`] extensions by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteAddr(pub SocketAddr);

/// Local socket address, stored in [`http::Request`] extensions by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalAddr(pub SocketAddr);

impl<B> From<&http::Request<B>> for HttpRequest {
    fn from(req: &http::Request<B>) -> Self {
        let uri = req.uri();
        let host = uri
            .authority()
            .map(|a| strip_userinfo(a.as_str()).to_string())
            .or_else(|| {
                req.headers()
                    .get(HOST)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        Self {
            method: req.method().as_str().to_string(),
            host,
            server_name: None,
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers: req.headers().clone(),
            remote_addr: req
                .extensions()
                .get::<RemoteAddr>()
                .map(|a| a.0.to_string()),
            local_addr: req.extensions().get::<LocalAddr>().map(|a| a.0.to_string()),
        }
    }
}

/// `user:pass@host:port` → `host:port`.
fn strip_userinfo(authority: &str) -> &str {
    authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host)
}
