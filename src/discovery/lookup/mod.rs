#[cfg(feature = "hickory-resolver")]
mod hickory_resolver;

use std::{future::Future, io};

/// The TXT records found at a DNS name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TxtAnswer<T> {
    /// The TXT records in the answer, one item per record. Records made up of
    /// several character-strings are expected to be concatenated.
    pub txts: T,
    /// The TTL of the answer’s record set, in seconds.
    pub ttl: u32,
}

impl<T> TxtAnswer<T> {
    pub fn new(txts: T, ttl: u32) -> Self {
        Self { txts, ttl }
    }
}

/// A trait for looking up DNS TXT records containing AID records.
///
/// The error type used here is `std::io::Error`. The following error kinds on
/// the query result are recognised and receive special treatment.
///
/// * `ErrorKind::NotFound` on the query: NXDOMAIN or no TXT data at the name
/// * `ErrorKind::TimedOut` on the query: timeout
///
/// Any other error on the query is a DNS transport failure. The inner,
/// per-record `std::io::Error` can be used to signal errors (encoding) with
/// individual TXT records; such records are skipped.
///
/// Queries are bounded by the lookup timeout of the discovery
/// [`Config`][crate::discovery::Config], implementations need not enforce a
/// timeout of their own.
pub trait LookupTxt: Send + Sync {
    /// The answer consisting of TXT records found.
    type Answer: IntoIterator<Item = io::Result<Vec<u8>>>;
    /// The future resolving to the query’s answer.
    type Query<'a>: Future<Output = io::Result<TxtAnswer<Self::Answer>>> + Send + 'a
    where
        Self: 'a;

    /// Looks up the domain’s TXT records in DNS.
    ///
    /// The domain will be passed to this trait as a string in A-label (ASCII)
    /// format, without trailing dot (eg `_agent.example.com`).
    fn lookup_txt(&self, domain: &str) -> Self::Query<'_>;
}
