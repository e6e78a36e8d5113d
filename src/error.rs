//! Machine-readable error codes.

use crate::util::CanonicalStr;
use std::fmt::{self, Display, Formatter};

/// A stable, machine-readable failure code.
///
/// Codes are shared between record parsing and discovery, and are part of the
/// cross-implementation conformance fixtures. The canonical string form (eg
/// `multiple_records`) must therefore never change.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorCode {
    /// Neither queried name yielded a usable record.
    NoRecord,
    /// More than one valid record was found under a single queried name.
    MultipleRecords,
    InvalidVersion,
    InvalidUri,
    InvalidProtocol,
    DuplicateField,
    MalformedToken,
    MissingField,
    /// DNS transport failure or timeout (other than ‘no such name’).
    DnsError,
}

impl ErrorCode {
    /// Returns the code for the given canonical string, if it is one.
    pub fn from_canonical_str(s: &str) -> Option<Self> {
        match s {
            "no_record" => Some(Self::NoRecord),
            "multiple_records" => Some(Self::MultipleRecords),
            "invalid_version" => Some(Self::InvalidVersion),
            "invalid_uri" => Some(Self::InvalidUri),
            "invalid_protocol" => Some(Self::InvalidProtocol),
            "duplicate_field" => Some(Self::DuplicateField),
            "malformed_token" => Some(Self::MalformedToken),
            "missing_field" => Some(Self::MissingField),
            "dns_error" => Some(Self::DnsError),
            _ => None,
        }
    }
}

impl CanonicalStr for ErrorCode {
    fn canonical_str(&self) -> &'static str {
        match self {
            Self::NoRecord => "no_record",
            Self::MultipleRecords => "multiple_records",
            Self::InvalidVersion => "invalid_version",
            Self::InvalidUri => "invalid_uri",
            Self::InvalidProtocol => "invalid_protocol",
            Self::DuplicateField => "duplicate_field",
            Self::MalformedToken => "malformed_token",
            Self::MissingField => "missing_field",
            Self::DnsError => "dns_error",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}
