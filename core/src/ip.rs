//! CIDR set membership.

use crate::MatcherError;
use ipnet::IpNet;
use std::net::IpAddr;

/// An ordered set of IP networks.
///
/// Lookup is a linear scan; CIDR containment cannot use a simple binary search
/// and the sets configured on a single rule are small.
///
/// ```
/// use reqmatch::IpCheckers;
///
/// let checkers = IpCheckers::parse(["127.0.0.0/8", "::1"]).unwrap();
/// assert!(checkers.contains("127.0.0.1".parse().unwrap()));
/// assert!(checkers.contains("::1".parse().unwrap()));
/// assert!(!checkers.contains("1.2.3.4".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpCheckers {
    nets: Vec<IpNet>,
}

impl IpCheckers {
    /// Parse a list of CIDR prefixes or bare addresses.
    ///
    /// A bare IPv4 address becomes a `/32`, a bare IPv6 address a `/128`.
    ///
    /// # Errors
    ///
    /// Returns [`MatcherError::InvalidIp`] for the first entry that is neither.
    pub fn parse<I>(entries: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let nets = entries
            .into_iter()
            .map(|e| parse_net(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { nets })
    }

    /// Check whether any network contains `ip`.
    #[must_use]
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.nets.iter().any(|net| net.contains(&ip))
    }

    /// The parsed networks, in input order.
    #[must_use]
    pub fn nets(&self) -> &[IpNet] {
        &self.nets
    }

    /// Returns true if no networks are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Number of configured networks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nets.len()
    }
}

fn parse_net(entry: &str) -> Result<IpNet, MatcherError> {
    let parsed = if entry.contains('/') {
        entry.parse::<IpNet>().map_err(|e| e.to_string())
    } else {
        entry
            .parse::<IpAddr>()
            .map(IpNet::from)
            .map_err(|e| e.to_string())
    };
    parsed.map_err(|reason| MatcherError::InvalidIp {
        input: entry.to_string(),
        reason,
    })
}
