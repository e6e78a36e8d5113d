// aid-discovery – implementation of Agent Identity Discovery
// Copyright © 2025–2026 The aid-discovery authors
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.

//! Discovery of AID records in DNS.

mod lookup;
mod query;

pub use lookup::{LookupTxt, TxtAnswer};

use crate::{
    discovery::query::{look_up_records, Selection},
    error::ErrorCode,
    parse::{is_protocol_token, is_valid_dns_name},
    record::AidRecord,
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
    time::Duration,
};
use tokio::task::JoinSet;
use tracing::{debug, trace};

/// The label prefixed to a domain to form the DNS name of its AID record.
pub const AGENT_LABEL: &str = "_agent";

/// Configuration for the discovery process.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The maximum duration of each AID record lookup. When this duration is
    /// exceeded discovery fails with a DNS error; no retry is attempted.
    pub lookup_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookup_timeout: Duration::from_secs(5),
        }
    }
}

/// The result of a successful discovery.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscoveryResult {
    /// The discovered AID record.
    pub record: AidRecord,
    /// The TTL of the DNS answer the record was found in, in seconds.
    pub ttl: u32,
    /// The DNS name queried to obtain the record.
    pub query_name: String,
}

/// An error that occurs during discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// The domain cannot be used to form a DNS query name.
    InvalidDomain { domain: String },
    /// The requested protocol is not a valid protocol token.
    InvalidProtocol { protocol: String },
    /// Neither queried name yielded a usable record.
    NoRecord { domain: String },
    /// More than one valid record was found at the queried name.
    MultipleRecords { name: String },
    /// The DNS query for the name failed or timed out.
    Dns { name: String, error: io::Error },
}

impl DiscoveryError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidDomain { .. } | Self::Dns { .. } => ErrorCode::DnsError,
            Self::InvalidProtocol { .. } => ErrorCode::InvalidProtocol,
            Self::NoRecord { .. } => ErrorCode::NoRecord,
            Self::MultipleRecords { .. } => ErrorCode::MultipleRecords,
        }
    }

    /// Whether this error is the result of a lookup timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Dns { error, .. } if error.kind() == io::ErrorKind::TimedOut)
    }
}

impl Display for DiscoveryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain } => write!(f, "invalid domain name: {domain}"),
            Self::InvalidProtocol { protocol } => write!(f, "invalid protocol: {protocol}"),
            Self::NoRecord { domain } => write!(f, "no AID record found for {domain}"),
            Self::MultipleRecords { name } => write!(
                f,
                "multiple valid AID records found for {name}; exactly one valid record per name is allowed"
            ),
            Self::Dns { name, error } => {
                if error.kind() == io::ErrorKind::TimedOut {
                    write!(f, "DNS query for {name} timed out")
                } else {
                    write!(f, "DNS query for {name} failed: {error}")
                }
            }
        }
    }
}

impl Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dns { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Converts a domain to the A-label form used in query names.
fn normalize_domain(domain: &str) -> Result<String, DiscoveryError> {
    let invalid = || DiscoveryError::InvalidDomain { domain: domain.into() };

    let s = domain.strip_suffix('.').unwrap_or(domain);

    let s = idna::domain_to_ascii(s).map_err(|_| invalid())?;

    if is_valid_dns_name(&s) {
        Ok(s)
    } else {
        Err(invalid())
    }
}

/// Returns the base query name `_agent.<domain>`.
pub fn base_name(domain: &str) -> String {
    format!("{AGENT_LABEL}.{domain}")
}

/// Returns the protocol-specific query name `_agent.<protocol>.<domain>`.
pub fn protocol_name(domain: &str, protocol: &str) -> String {
    format!("{AGENT_LABEL}.{protocol}.{domain}")
}

/// Discovers the AID record for a domain.
///
/// The TXT records at the base name `_agent.<domain>` are queried first. If a
/// `protocol` is requested and the base name does not yield a record for that
/// protocol, the protocol-specific name `_agent.<protocol>.<domain>` is queried
/// next. A record found there takes precedence; otherwise a single valid
/// record at the base name, even for a different protocol, is the fallback.
///
/// At most two queries are issued, one after the other, for exactly these two
/// names; ancestor domains are never consulted. More than one valid record at
/// a queried name is an error, as is any DNS failure other than ‘no such
/// name’. No results are cached.
///
/// # Examples
///
/// ```
/// # use std::{future::Future, io::{self, ErrorKind}, pin::Pin};
/// # use aid_discovery::discovery::TxtAnswer;
/// # struct MockLookupTxt;
/// # impl aid_discovery::discovery::LookupTxt for MockLookupTxt {
/// #     type Answer = Vec<io::Result<Vec<u8>>>;
/// #     type Query<'a> = Pin<Box<dyn Future<Output = io::Result<TxtAnswer<Self::Answer>>> + Send + 'a>>;
/// #
/// #     fn lookup_txt(&self, domain: &str) -> Self::Query<'_> {
/// #         let domain = domain.to_owned();
/// #         Box::pin(async move {
/// #             match domain.as_str() {
/// #                 "_agent.example.com" => Ok(TxtAnswer::new(
/// #                     vec![Ok(b"v=aid1;uri=https://api.example.com/mcp;proto=mcp".to_vec())],
/// #                     300,
/// #                 )),
/// #                 _ => Err(ErrorKind::NotFound.into()),
/// #             }
/// #         })
/// #     }
/// # }
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// use aid_discovery::*;
///
/// // Note: Enable Cargo feature `hickory-resolver` to make an implementation
/// // of trait `LookupTxt` available for Hickory DNS’s `TokioAsyncResolver`.
/// let resolver;  // = TokioAsyncResolver::tokio(...);
/// # resolver = MockLookupTxt;
///
/// let config = Config::default();
///
/// let result = discover(&resolver, "example.com", None, &config).await?;
///
/// assert_eq!(result.record.uri(), "https://api.example.com/mcp");
/// assert_eq!(result.record.protocol(), "mcp");
/// assert_eq!(result.ttl, 300);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// # }).unwrap();
/// ```
pub async fn discover<T>(
    resolver: &T,
    domain: &str,
    protocol: Option<&str>,
    config: &Config,
) -> Result<DiscoveryResult, DiscoveryError>
where
    T: LookupTxt + ?Sized,
{
    if let Some(protocol) = protocol {
        if !is_protocol_token(protocol) {
            return Err(DiscoveryError::InvalidProtocol { protocol: protocol.into() });
        }
    }

    let domain = normalize_domain(domain)?;

    let name = base_name(&domain);

    let outcome = look_up_records(resolver, &name, config).await?;

    // The fallback candidate is the only state carried over to the second
    // query. It is fixed before that query begins.
    let fallback = match outcome.select(&name)? {
        Selection::Single(record, ttl) => match protocol {
            Some(protocol) if record.protocol() != protocol => {
                trace!(%name, found = record.protocol(), requested = protocol, "protocol mismatch, keeping fallback");
                Some(DiscoveryResult { record, ttl, query_name: name.clone() })
            }
            _ => {
                debug!(%name, ttl, "discovered AID record");
                return Ok(DiscoveryResult { record, ttl, query_name: name });
            }
        },
        Selection::Empty => None,
    };

    let Some(protocol) = protocol else {
        debug!(%name, "no AID record");
        return Err(DiscoveryError::NoRecord { domain });
    };

    let name = protocol_name(&domain, protocol);

    let outcome = look_up_records(resolver, &name, config).await?;

    match outcome.select(&name)? {
        Selection::Single(record, ttl) => {
            debug!(%name, ttl, "discovered protocol-specific AID record");
            Ok(DiscoveryResult { record, ttl, query_name: name })
        }
        Selection::Empty => match fallback {
            Some(result) => {
                debug!(name = %result.query_name, ttl = result.ttl, "falling back to base AID record");
                Ok(result)
            }
            None => {
                debug!(%name, "no AID record");
                Err(DiscoveryError::NoRecord { domain })
            }
        },
    }
}

/// Discovers the AID records of several domains concurrently.
///
/// Each domain is discovered independently as with [`discover`]. The results
/// are returned in the order of the input domains.
pub async fn discover_multiple<T, I>(
    resolver: &T,
    domains: I,
    protocol: Option<&str>,
    config: &Config,
) -> Vec<(String, Result<DiscoveryResult, DiscoveryError>)>
where
    T: LookupTxt + Clone + 'static,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut set = JoinSet::new();

    let domains: Vec<String> = domains.into_iter().map(Into::into).collect();

    for (i, domain) in domains.iter().enumerate() {
        trace!(%domain, "spawning discovery");

        let resolver = resolver.clone();
        let domain = domain.clone();
        let protocol = protocol.map(String::from);
        let config = config.clone();

        set.spawn(async move {
            let result = discover(&resolver, &domain, protocol.as_deref(), &config).await;
            (i, result)
        });
    }

    let mut results: Vec<Option<Result<_, _>>> = domains.iter().map(|_| None).collect();

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((i, result)) => results[i] = Some(result),
            // Tasks are never aborted, so only a panic ends up here.
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    domains
        .into_iter()
        .zip(results)
        .filter_map(|(domain, result)| result.map(|r| (domain, r)))
        .collect()
}

/// Whether an AID record can be discovered for the domain.
pub async fn has_aid_record<T>(
    resolver: &T,
    domain: &str,
    protocol: Option<&str>,
    config: &Config,
) -> bool
where
    T: LookupTxt + ?Sized,
{
    discover(resolver, domain, protocol, config).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_domain_ok() {
        assert_eq!(normalize_domain("example.com").unwrap(), "example.com");
        assert_eq!(normalize_domain("Example.COM.").unwrap(), "example.com");
        assert_eq!(normalize_domain("example.中国").unwrap(), "example.xn--fiqs8s");
    }

    #[test]
    fn normalize_domain_invalid() {
        for domain in ["", ".", "exa mple.com", "example..com", "-example.com"] {
            let error = normalize_domain(domain).unwrap_err();
            assert_eq!(error.code(), ErrorCode::DnsError, "{domain:?}");
        }
    }

    #[test]
    fn query_names_ok() {
        assert_eq!(base_name("example.com"), "_agent.example.com");
        assert_eq!(protocol_name("example.com", "mcp"), "_agent.mcp.example.com");
    }

    #[test]
    fn discovery_error_display() {
        let error = DiscoveryError::Dns {
            name: "_agent.example.com".into(),
            error: io::ErrorKind::TimedOut.into(),
        };

        assert!(error.is_timeout());
        assert_eq!(error.to_string(), "DNS query for _agent.example.com timed out");
        assert!(error.source().is_some());

        let error = DiscoveryError::NoRecord { domain: "missing.com".into() };

        assert!(!error.is_timeout());
        assert_eq!(error.to_string(), "no AID record found for missing.com");
    }
}
