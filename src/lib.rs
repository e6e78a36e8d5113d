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

//! A library implementing *Agent Identity Discovery* (AID): locating an
//! agent’s endpoint through a DNS TXT record.
//!
//! An AID record is a short `key=value;` string published at the DNS name
//! `_agent.<domain>`, for example:
//!
//! ```text
//! _agent.example.com. 300 IN TXT "v=aid1;uri=https://api.example.com/mcp;proto=mcp"
//! ```
//!
//! Optionally, a record for a specific protocol may be published at
//! `_agent.<protocol>.<domain>`.
//!
//! This library provides two operations: [`parse`], which turns one TXT string
//! into a validated [`AidRecord`], and [`discover`], which looks up the TXT
//! records of a domain and applies the selection and fallback rules to arrive
//! at exactly one record or one error. For convenience, all the relevant items
//! are re-exported at the top level.
//!
//! Failures carry a stable [`ErrorCode`] (eg `no_record`,
//! `multiple_records`), whose canonical string form is shared with other AID
//! implementations.
//!
//! # Usage
//!
//! DNS lookups go through the trait [`LookupTxt`], which callers implement or
//! obtain from the optional resolver integration. See [`discover`] for basic
//! usage.
//!
//! # Cargo features
//!
//! The feature **`hickory-resolver`** makes an implementation of
//! [`LookupTxt`][crate::discovery::LookupTxt] available for the Hickory DNS
//! resolver.

pub mod discovery;
pub mod error;
mod parse;
pub mod record;
mod tag_list;
mod util;

pub use crate::{
    discovery::{
        discover, discover_multiple, has_aid_record, Config, DiscoveryError, DiscoveryResult,
        LookupTxt, TxtAnswer,
    },
    error::ErrorCode,
    record::{parse, AidRecord, AidRecordParseError},
    util::CanonicalStr,
};
