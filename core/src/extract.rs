//! Value extraction: pluggable accessors for the request fields that need
//! interpretation before matching.
//!
//! The embedding application decides how host, path, client IP and server IP
//! are derived from a request (for instance, trusting `X-Forwarded-For` behind
//! a proxy). Those decisions live in an [`Extractors`] value injected into a
//! [`Factory`](crate::Factory); matchers capture the accessors they need at
//! construction time. [`Extractors::default`] implements the transport-level
//! defaults below.

use crate::{fix_path, HttpRequest};
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// Accessor returning the lower-cased request host, without port.
pub type HostFn = Arc<dyn Fn(&HttpRequest) -> String + Send + Sync>;

/// Accessor returning the canonical request path.
pub type PathFn = Arc<dyn Fn(&HttpRequest) -> String + Send + Sync>;

/// Accessor resolving a peer address. `None` makes IP matchers evaluate `false`.
pub type IpFn = Arc<dyn Fn(&HttpRequest) -> Option<IpAddr> + Send + Sync>;

/// The set of accessors matchers use to read a request.
///
/// # Example
///
/// ```
/// use reqmatch::{Extractors, Factory, HttpRequest, Matcher};
///
/// // Behind a proxy: take the client address from X-Real-Ip.
/// let extractors = Extractors::default().with_client_ip(|r: &HttpRequest| {
///     r.header("x-real-ip").and_then(|v| v.parse().ok())
/// });
/// let factory = Factory::new(extractors);
///
/// let m = factory.client_ip(["10.0.0.0/8"]).unwrap().unwrap();
/// let request = HttpRequest::builder()
///     .remote_addr("192.168.0.9:1234")
///     .header("X-Real-Ip", "10.1.2.3")
///     .build();
/// assert!(m.matches(&request));
/// ```
#[derive(Clone)]
pub struct Extractors {
    host: HostFn,
    path: PathFn,
    client_ip: IpFn,
    server_ip: IpFn,
}

impl Default for Extractors {
    fn default() -> Self {
        Self {
            host: Arc::new(default_host),
            path: Arc::new(default_path),
            client_ip: Arc::new(default_client_ip),
            server_ip: Arc::new(default_server_ip),
        }
    }
}

impl fmt::Debug for Extractors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractors").finish_non_exhaustive()
    }
}

impl Extractors {
    /// Replace the host accessor. The returned host must be lower case.
    #[must_use]
    pub fn with_host<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpRequest) -> String + Send + Sync + 'static,
    {
        self.host = Arc::new(f);
        self
    }

    /// Replace the path accessor.
    #[must_use]
    pub fn with_path<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpRequest) -> String + Send + Sync + 'static,
    {
        self.path = Arc::new(f);
        self
    }

    /// Replace the client IP accessor.
    #[must_use]
    pub fn with_client_ip<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpRequest) -> Option<IpAddr> + Send + Sync + 'static,
    {
        self.client_ip = Arc::new(f);
        self
    }

    /// Replace the server IP accessor.
    #[must_use]
    pub fn with_server_ip<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpRequest) -> Option<IpAddr> + Send + Sync + 'static,
    {
        self.server_ip = Arc::new(f);
        self
    }

    /// Extract the host of `request`.
    #[must_use]
    pub fn host(&self, request: &HttpRequest) -> String {
        (self.host)(request)
    }

    /// Extract the path of `request`.
    #[must_use]
    pub fn path(&self, request: &HttpRequest) -> String {
        (self.path)(request)
    }

    /// Resolve the client address of `request`.
    #[must_use]
    pub fn client_ip(&self, request: &HttpRequest) -> Option<IpAddr> {
        (self.client_ip)(request)
    }

    /// Resolve the server address of `request`.
    #[must_use]
    pub fn server_ip(&self, request: &HttpRequest) -> Option<IpAddr> {
        (self.server_ip)(request)
    }

    pub(crate) fn host_fn(&self) -> HostFn {
        Arc::clone(&self.host)
    }

    pub(crate) fn path_fn(&self) -> PathFn {
        Arc::clone(&self.path)
    }

    pub(crate) fn client_ip_fn(&self) -> IpFn {
        Arc::clone(&self.client_ip)
    }

    pub(crate) fn server_ip_fn(&self) -> IpFn {
        Arc::clone(&self.server_ip)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Defaults
// ═══════════════════════════════════════════════════════════════════════════════

/// TLS server name if present, otherwise the authority without its port,
/// lower-cased.
fn default_host(request: &HttpRequest) -> String {
    match request.server_name() {
        Some(name) if !name.is_empty() => name.to_ascii_lowercase(),
        _ => trim_port(request.host()).to_ascii_lowercase(),
    }
}

fn default_path(request: &HttpRequest) -> String {
    fix_path(request.path())
}

fn default_client_ip(request: &HttpRequest) -> Option<IpAddr> {
    resolve("client", request.remote_addr())
}

fn default_server_ip(request: &HttpRequest) -> Option<IpAddr> {
    resolve("server", request.local_addr())
}

/// Parse a transport address (`ip`, `ip:port` or `[ipv6]:port`).
///
/// Failures are logged and yield `None`; IPv4-mapped IPv6 addresses are
/// normalized to IPv4.
fn resolve(peer: &'static str, addr: Option<&str>) -> Option<IpAddr> {
    let Some(raw) = addr else {
        tracing::debug!(peer, "no transport address on request");
        return None;
    };
    match trim_port(raw).parse::<IpAddr>() {
        Ok(ip) => Some(ip.to_canonical()),
        Err(e) => {
            tracing::error!(peer, addr = raw, error = %e, "failed to parse ip");
            None
        }
    }
}

/// Strip a trailing `:port` and enclosing IPv6 brackets from an address.
///
/// Bare IPv6 addresses (several colons, no brackets) are returned unchanged.
///
/// ```
/// use reqmatch::trim_port;
///
/// assert_eq!(trim_port("example.com:8080"), "example.com");
/// assert_eq!(trim_port("127.0.0.1"), "127.0.0.1");
/// assert_eq!(trim_port("[::1]:443"), "::1");
/// assert_eq!(trim_port("fe80::1"), "fe80::1");
/// ```
#[must_use]
pub fn trim_port(addr: &str) -> &str {
    if let Some(rest) = addr.strip_prefix('[') {
        return rest.split_once(']').map_or(addr, |(host, _)| host);
    }
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.bytes().all(|b| b.is_ascii_digit()) => {
            host
        }
        _ => addr,
    }
}
