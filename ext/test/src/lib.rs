//! reqmatch-test: Conformance fixtures for reqmatch
//!
//! Fixtures are YAML documents naming a constructor call (`host`, `and`, ...),
//! the expected priority and description, and a list of requests with the
//! expected match result. The runner lives behind the `fixtures` feature.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "fixtures")] {
//! use reqmatch_test::fixture::Fixture;
//!
//! let fixture = Fixture::from_yaml(r#"
//! name: wildcard_host
//! description: leading wildcard matches subdomains only
//! matcher:
//!   host: ["*.example.com"]
//! priority: 65000
//! string: "Host(`*.example.com`)"
//! cases:
//!   - name: subdomain
//!     request: { host: "api.example.com" }
//!     expect: true
//!   - name: apex
//!     request: { host: "example.com" }
//!     expect: false
//! "#).unwrap();
//!
//! fixture.run_and_assert();
//! # }
//! ```

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Prelude for convenient imports.
pub mod prelude {
    #[cfg(feature = "fixtures")]
    pub use super::fixture::{Fixture, MatcherConfig, RequestConfig};
    pub use reqmatch::prelude::*;
}

#[cfg(all(test, feature = "fixtures"))]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_parse_nested_matcher() {
        let fixture = Fixture::from_yaml(
            r#"
name: nested
description: and of or
matcher:
  and:
    - method: [GET]
    - or:
        - header: { key: X-A }
        - query: { key: a, value: "1" }
cases: []
"#,
        )
        .unwrap();

        let matcher = fixture.matcher.build().unwrap().unwrap();
        assert_eq!(
            matcher.description(),
            "(Method(`GET`) && (Header(`X-A`) || Query(`a`,`1`)))"
        );
        assert_eq!(matcher.priority(), 44);
    }

    #[test]
    fn test_empty_children_are_dropped() {
        let config: MatcherConfig = serde_yaml::from_str(
            r#"
and:
  - host: []
  - path: [/a]
"#,
        )
        .unwrap();

        let matcher = config.build().unwrap().unwrap();
        assert_eq!(matcher.description(), "Path(`/a`)");
    }

    #[test]
    fn test_request_config() {
        let config: RequestConfig = serde_yaml::from_str(
            r#"
method: PUT
host: Example.com:8080
target: /a/b?x=1
headers: { X-Key: v }
remote_addr: "10.0.0.1:5"
"#,
        )
        .unwrap();

        let request = config.build();
        assert_eq!(request.method(), "PUT");
        assert_eq!(request.host(), "Example.com:8080");
        assert_eq!(request.path(), "/a/b");
        assert_eq!(request.raw_query(), Some("x=1"));
        assert_eq!(request.header("x-key"), Some("v"));
        assert_eq!(request.remote_addr(), Some("10.0.0.1:5"));
    }

    #[test]
    fn test_invalid_ip_error() {
        let config: MatcherConfig = serde_yaml::from_str("client_ip: [localhost]").unwrap();
        assert!(config.build().is_err());
    }
}
