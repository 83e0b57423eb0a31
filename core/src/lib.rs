//! reqmatch - composable HTTP request matchers
//!
//! Build boolean conditions over HTTP requests from small primitives, combine
//! them with AND/OR, and get back a deterministic description plus a relative
//! specificity score for every condition. Routing layers use the score to pick
//! the most specific rule among several that match.
//!
//! # Architecture
//!
//! - [`HttpRequest`]: The request abstraction matchers evaluate against
//! - [`Extractors`]: Pluggable accessors for host, path, client IP and server IP
//! - [`Factory`]: Primitive constructors bound to a custom [`Extractors`]
//! - [`Matcher`]: `matches` / `priority` / `description`, shared as [`SharedMatcher`]
//! - [`FnMatcher`]: Primitive matcher: a closure plus its priority and description
//! - [`Compound`]: AND/OR over child matchers, sorted by priority
//! - [`IpCheckers`]: CIDR set used by [`client_ip`] and [`server_ip`]
//!
//! # Key Design Insights
//!
//! 1. **`None` means "no constraint"**: Constructors return `None` for empty
//!    input. Callers omit the predicate; `None` never means "never matches".
//!
//! 2. **Priority is derived, not configured**: Primitives carry a weight from the
//!    `PRIORITY_*` table (scaled by literal length for host and paths). `and`
//!    sums child priorities, `or` takes the maximum.
//!
//! 3. **Descriptions are stable**: Children are stable-sorted by descending
//!    priority before the description is rendered, so equal inputs always
//!    render the same string.
//!
//! # Example
//!
//! ```
//! use reqmatch::prelude::*;
//!
//! let matcher = and([
//!     method(["GET"]),
//!     path(["/"]),
//!     host(["localhost"]),
//!     client_ip(["127.0.0.1"]).unwrap(),
//! ]
//! .into_iter()
//! .flatten());
//!
//! let request = HttpRequest::builder()
//!     .method("GET")
//!     .path("/")
//!     .host("localhost")
//!     .remote_addr("127.0.0.1:4321")
//!     .build();
//!
//! assert!(matcher.matches(&request));
//! assert_eq!(matcher.priority(), 5000 * 9 + 500 + 40 + 20);
//! assert_eq!(
//!     matcher.to_string(),
//!     "(Host(`localhost`) && Path(`/`) && Method(`GET`) && ClientIp(`127.0.0.1`))"
//! );
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod addr;
mod compound;
mod describe;
mod extract;
mod factory;
mod header;
mod host;
mod ip;
mod matcher;
mod method;
mod path;
mod query;
mod request;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use compound::{and, or, sort, Combinator, Compound};
pub use extract::{Extractors, HostFn, IpFn, PathFn};
pub use factory::Factory;
pub use ip::IpCheckers;
pub use matcher::{always_false, always_true, new, FnMatcher, Matcher, SharedMatcher};
pub use request::{HttpRequest, HttpRequestBuilder, LocalAddr, RemoteAddr};

// Primitive constructors
pub use addr::{client_ip, server_ip};
pub use header::{canonical_header_key, header, headerm};
pub use host::host;
pub use method::method;
pub use path::{fix_path, path, path_prefix};
pub use query::{query, querym};

// Helpers
pub use describe::remove_parentheses;
pub use extract::trim_port;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use reqmatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Combinators
        and,
        // Primitive constructors
        client_ip,
        header,
        headerm,
        host,
        method,
        or,
        path,
        path_prefix,
        query,
        querym,
        remove_parentheses,
        server_ip,
        sort,
        // Core types
        Combinator,
        Compound,
        Extractors,
        Factory,
        HttpRequest,
        Matcher,
        // Errors
        MatcherError,
        SharedMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Priorities
// ═══════════════════════════════════════════════════════════════════════════════

/// Base weight of [`query`] and [`querym`] (per key/value pair).
pub const PRIORITY_QUERY: usize = 1;

/// Base weight of [`header`] and [`headerm`] (per key/value pair).
pub const PRIORITY_HEADER: usize = 4;

/// Weight of [`client_ip`].
pub const PRIORITY_CLIENT_IP: usize = 20;

/// Weight of [`server_ip`].
pub const PRIORITY_SERVER_IP: usize = 20;

/// Weight of [`method`], independent of the method names.
pub const PRIORITY_METHOD: usize = 40;

/// Base weight of [`path_prefix`], multiplied by the longest prefix length.
pub const PRIORITY_PATH_PREFIX: usize = 50;

/// Base weight of [`path`], multiplied by the longest path length.
pub const PRIORITY_PATH: usize = 500;

/// Base weight of [`host`], multiplied by the longest host length.
pub const PRIORITY_HOST: usize = 5000;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from matcher construction.
///
/// Evaluation never fails: accessor problems at match time are logged and
/// evaluate to `false`. Only malformed constructor input surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatcherError {
    /// An entry passed to [`client_ip`] or [`server_ip`] is neither an IP
    /// address nor a CIDR prefix.
    #[error("invalid ip or cidr \"{input}\": {reason}")]
    InvalidIp {
        /// The rejected entry.
        input: String,
        /// The underlying parse error message.
        reason: String,
    },
}
