//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the reqmatch constructors.

use reqmatch::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A complete test fixture
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    pub description: String,
    pub matcher: MatcherConfig,
    /// Expected priority of the built matcher.
    #[serde(default)]
    pub priority: Option<usize>,
    /// Expected description of the built matcher.
    #[serde(default)]
    pub string: Option<String>,
    /// The constructor must return no matcher.
    #[serde(default)]
    pub absent: bool,
    /// The constructor must fail with an error containing this text.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

/// Matcher constructor call from YAML
/// Uses untagged deserialization - every variant has a distinct key.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MatcherConfig {
    And(AndMatcher),
    Or(OrMatcher),
    Host(HostMatcher),
    Path(PathMatcher),
    PathPrefix(PathPrefixMatcher),
    Method(MethodMatcher),
    Header(HeaderMatcher),
    Headers(HeadersMatcher),
    Query(QueryMatcher),
    Queries(QueriesMatcher),
    ClientIp(ClientIpMatcher),
    ServerIp(ServerIpMatcher),
}

#[derive(Debug, Deserialize)]
pub struct AndMatcher {
    pub and: Vec<MatcherConfig>,
}

#[derive(Debug, Deserialize)]
pub struct OrMatcher {
    pub or: Vec<MatcherConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HostMatcher {
    pub host: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PathMatcher {
    pub path: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PathPrefixMatcher {
    pub path_prefix: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct MethodMatcher {
    pub method: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct HeaderMatcher {
    pub header: KeyValue,
}

#[derive(Debug, Deserialize)]
pub struct HeadersMatcher {
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryMatcher {
    pub query: KeyValue,
}

#[derive(Debug, Deserialize)]
pub struct QueriesMatcher {
    pub queries: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct ClientIpMatcher {
    pub client_ip: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServerIpMatcher {
    pub server_ip: Vec<String>,
}

/// Single key/value condition; an omitted value means "present".
#[derive(Debug, Deserialize)]
pub struct KeyValue {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub request: RequestConfig,
    pub expect: bool,
}

/// Request fields; anything omitted is left empty.
#[derive(Debug, Default, Deserialize)]
pub struct RequestConfig {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub server_name: Option<String>,
    /// Path with optional `?query`.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub remote_addr: Option<String>,
    #[serde(default)]
    pub local_addr: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: Convert config to reqmatch types
// ═══════════════════════════════════════════════════════════════════════════════

impl MatcherConfig {
    /// Call the constructor this config describes.
    ///
    /// Children of `and`/`or` that build to no matcher are dropped.
    pub fn build(&self) -> Result<Option<SharedMatcher>, MatcherError> {
        Ok(match self {
            MatcherConfig::And(a) => Some(and(Self::build_all(&a.and)?)),
            MatcherConfig::Or(o) => Some(or(Self::build_all(&o.or)?)),
            MatcherConfig::Host(h) => host(&h.host),
            MatcherConfig::Path(p) => path(&p.path),
            MatcherConfig::PathPrefix(p) => path_prefix(&p.path_prefix),
            MatcherConfig::Method(m) => method(&m.method),
            MatcherConfig::Header(h) => header(&h.header.key, &h.header.value),
            MatcherConfig::Headers(h) => headerm(&h.headers),
            MatcherConfig::Query(q) => query(&q.query.key, &q.query.value),
            MatcherConfig::Queries(q) => querym(&q.queries),
            MatcherConfig::ClientIp(c) => client_ip(&c.client_ip)?,
            MatcherConfig::ServerIp(s) => server_ip(&s.server_ip)?,
        })
    }

    fn build_all(configs: &[MatcherConfig]) -> Result<Vec<SharedMatcher>, MatcherError> {
        let mut built = Vec::with_capacity(configs.len());
        for config in configs {
            built.extend(config.build()?);
        }
        Ok(built)
    }
}

impl RequestConfig {
    /// Build an `HttpRequest` from this config
    pub fn build(&self) -> HttpRequest {
        let mut builder = HttpRequest::builder();
        if let Some(method) = &self.method {
            builder = builder.method(method.as_str());
        }
        if let Some(host) = &self.host {
            builder = builder.host(host.as_str());
        }
        if let Some(server_name) = &self.server_name {
            builder = builder.server_name(server_name.as_str());
        }
        if let Some(target) = &self.target {
            builder = builder.target(target);
        }
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        if let Some(addr) = &self.remote_addr {
            builder = builder.remote_addr(addr);
        }
        if let Some(addr) = &self.local_addr {
            builder = builder.local_addr(addr);
        }
        builder.build()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    pub expected: bool,
    pub actual: bool,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases against `matcher` and return results
    pub fn run(&self, matcher: &SharedMatcher) -> Vec<CaseResult> {
        self.cases
            .iter()
            .map(|case| {
                let actual = matcher.matches(&case.request.build());
                CaseResult {
                    case_name: case.name.clone(),
                    passed: actual == case.expect,
                    expected: case.expect,
                    actual,
                }
            })
            .collect()
    }

    /// Build the matcher, check its expectations and panic on first failure
    pub fn run_and_assert(&self) {
        let built = self.matcher.build();

        if let Some(expected) = &self.error {
            match built {
                Err(e) => assert!(
                    e.to_string().contains(expected.as_str()),
                    "Fixture '{}': error {:?} does not contain {:?}",
                    self.name,
                    e.to_string(),
                    expected
                ),
                Ok(m) => panic!(
                    "Fixture '{}': expected error {:?}, got {:?}",
                    self.name, expected, m
                ),
            }
            return;
        }

        let built = built.unwrap_or_else(|e| panic!("Fixture '{}': {e}", self.name));
        if self.absent {
            assert!(
                built.is_none(),
                "Fixture '{}': expected no matcher, got {:?}",
                self.name,
                built
            );
            return;
        }
        let matcher =
            built.unwrap_or_else(|| panic!("Fixture '{}': constructor returned none", self.name));

        if let Some(priority) = self.priority {
            assert_eq!(
                matcher.priority(),
                priority,
                "Fixture '{}' priority",
                self.name
            );
        }
        if let Some(string) = &self.string {
            assert_eq!(
                matcher.description(),
                string.as_str(),
                "Fixture '{}' description",
                self.name
            );
        }

        for result in self.run(&matcher) {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed: expected {}, got {}",
                self.name, result.case_name, result.expected, result.actual
            );
        }
    }
}
