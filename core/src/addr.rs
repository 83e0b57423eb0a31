//! Client and server IP matchers.

use crate::{
    describe, matcher, Extractors, IpCheckers, IpFn, MatcherError, SharedMatcher,
    PRIORITY_CLIENT_IP, PRIORITY_SERVER_IP,
};

/// Match when the client (remote) address is in one of `ips`.
///
/// Entries are CIDR prefixes or bare addresses. The address is resolved with
/// the default [`Extractors`]; use [`Factory`](crate::Factory) to plug in a
/// different resolver. Priority is [`PRIORITY_CLIENT_IP`].
///
/// Returns `Ok(None)` for empty input.
///
/// # Errors
///
/// Returns [`MatcherError::InvalidIp`] if any entry fails to parse.
///
/// ```
/// use reqmatch::{client_ip, HttpRequest, Matcher};
///
/// let m = client_ip(["127.0.0.0/8", "192.168.0.0/16"]).unwrap().unwrap();
/// let from = |a: &str| HttpRequest::builder().remote_addr(a).build();
///
/// assert!(m.matches(&from("127.0.0.1:1234")));
/// assert!(!m.matches(&from("1.2.3.4:7890")));
/// assert!(client_ip(["localhost"]).is_err());
/// ```
pub fn client_ip<I>(ips: I) -> Result<Option<SharedMatcher>, MatcherError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    client_ip_with(&Extractors::default(), ips)
}

/// Match when the server (local) address is in one of `ips`.
///
/// Same rules as [`client_ip`], resolved against the local address.
/// Priority is [`PRIORITY_SERVER_IP`].
///
/// # Errors
///
/// Returns [`MatcherError::InvalidIp`] if any entry fails to parse.
pub fn server_ip<I>(ips: I) -> Result<Option<SharedMatcher>, MatcherError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    server_ip_with(&Extractors::default(), ips)
}

pub(crate) fn client_ip_with<I>(
    extractors: &Extractors,
    ips: I,
) -> Result<Option<SharedMatcher>, MatcherError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    build(
        "ClientIp",
        PRIORITY_CLIENT_IP,
        extractors.client_ip_fn(),
        ips,
    )
}

pub(crate) fn server_ip_with<I>(
    extractors: &Extractors,
    ips: I,
) -> Result<Option<SharedMatcher>, MatcherError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    build(
        "ServerIp",
        PRIORITY_SERVER_IP,
        extractors.server_ip_fn(),
        ips,
    )
}

fn build<I>(
    name: &str,
    priority: usize,
    resolve: IpFn,
    ips: I,
) -> Result<Option<SharedMatcher>, MatcherError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let ips: Vec<String> = ips.into_iter().map(|ip| ip.as_ref().to_string()).collect();
    if ips.is_empty() {
        return Ok(None);
    }

    let checkers = IpCheckers::parse(&ips)?;
    let description = describe::values(name, &ips);
    Ok(Some(matcher::new(priority, description, move |r| {
        resolve(r).is_some_and(|ip| checkers.contains(ip))
    })))
}
