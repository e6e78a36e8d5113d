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

use crate::{
    discovery::{Config, DiscoveryError, LookupTxt},
    record::AidRecord,
};
use std::{
    io::{self, ErrorKind},
    str,
};
use tokio::time;
use tracing::trace;

/// The outcome of a TXT query at one DNS name, with the TXT records already
/// filtered down to valid AID record candidates.
#[derive(Debug, PartialEq)]
pub enum QueryOutcome {
    /// No such name, or no TXT data at the name.
    NoSuchName,
    /// The name had TXT records; only those that parsed are retained.
    Candidates(Vec<AidRecord>, u32),
}

/// The outcome of a query once the single-candidate rule has been applied.
#[derive(Debug, PartialEq)]
pub enum Selection {
    /// No usable record at the name.
    Empty,
    /// Exactly one valid record, with the answer’s TTL.
    Single(AidRecord, u32),
}

impl QueryOutcome {
    /// Reduces the candidates to at most one; more than one valid candidate
    /// under a single name is an ambiguity and fails.
    pub fn select(self, name: &str) -> Result<Selection, DiscoveryError> {
        match self {
            Self::NoSuchName => Ok(Selection::Empty),
            Self::Candidates(mut records, ttl) => match records.len() {
                0 => Ok(Selection::Empty),
                1 => {
                    let record = records.swap_remove(0);
                    Ok(Selection::Single(record, ttl))
                }
                n => {
                    trace!(%name, candidates = n, "ambiguous AID records");
                    Err(DiscoveryError::MultipleRecords { name: name.into() })
                }
            },
        }
    }
}

/// Queries the TXT records at the given name, bounded by the configured lookup
/// timeout.
pub async fn look_up_records<T: LookupTxt + ?Sized>(
    resolver: &T,
    name: &str,
    config: &Config,
) -> Result<QueryOutcome, DiscoveryError> {
    trace!(%name, "issuing DNS TXT query");

    let f = resolver.lookup_txt(name);

    let answer = match time::timeout(config.lookup_timeout, f).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
            trace!(%name, "no such name");
            return Ok(QueryOutcome::NoSuchName);
        }
        Ok(Err(e)) => {
            trace!(%name, error = %e, "DNS TXT query failed");
            return Err(DiscoveryError::Dns { name: name.into(), error: e });
        }
        Err(_) => {
            trace!(%name, "DNS TXT query timed out");
            return Err(DiscoveryError::Dns {
                name: name.into(),
                error: ErrorKind::TimedOut.into(),
            });
        }
    };

    let ttl = answer.ttl;

    let records = filter_candidates(name, answer.txts);

    trace!(%name, candidates = records.len(), ttl, "received DNS TXT answer");

    Ok(QueryOutcome::Candidates(records, ttl))
}

/// Parses each TXT record and retains those that are valid AID records.
///
/// Failures with individual records are not errors: they only reduce the
/// number of candidates.
fn filter_candidates<I>(name: &str, txts: I) -> Vec<AidRecord>
where
    I: IntoIterator<Item = io::Result<Vec<u8>>>,
{
    let mut records = vec![];

    for txt in txts {
        let txt = match txt {
            Ok(txt) => txt,
            Err(e) => {
                trace!(%name, error = %e, "skipping unreadable TXT record");
                continue;
            }
        };

        let s = match str::from_utf8(&txt) {
            Ok(s) => s,
            Err(_) => {
                trace!(%name, "skipping TXT record with invalid UTF-8");
                continue;
            }
        };

        match s.parse::<AidRecord>() {
            Ok(record) => records.push(record),
            Err(e) => {
                trace!(%name, txt = %s, error = %e, code = %e.code(), "skipping invalid AID record");
            }
        }
    }

    records
}
