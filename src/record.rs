//! AID record.

use crate::{
    error::ErrorCode,
    parse::is_protocol_token,
    tag_list::{TagList, TagSpec},
    util::CanonicalStr,
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};
use url::Url;

/// The only record version understood by this implementation.
pub const AID_VERSION: &str = "aid1";

/// A canonical AID record field.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    Version,
    Uri,
    Protocol,
    Auth,
    Description,
    Docs,
    Deprecation,
    PublicKey,
    KeyId,
}

impl CanonicalStr for Field {
    fn canonical_str(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Uri => "uri",
            Self::Protocol => "protocol",
            Self::Auth => "auth",
            Self::Description => "desc",
            Self::Docs => "docs",
            Self::Deprecation => "dep",
            Self::PublicKey => "pka",
            Self::KeyId => "kid",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_str())
    }
}

// Accepted key spellings; keys are compared ignoring ASCII case.
const FIELD_KEYS: &[(&str, Field)] = &[
    ("v", Field::Version),
    ("uri", Field::Uri),
    ("u", Field::Uri),
    ("proto", Field::Protocol),
    ("p", Field::Protocol),
    ("auth", Field::Auth),
    ("a", Field::Auth),
    ("desc", Field::Description),
    ("s", Field::Description),
    ("docs", Field::Docs),
    ("d", Field::Docs),
    ("dep", Field::Deprecation),
    ("e", Field::Deprecation),
    ("pka", Field::PublicKey),
    ("k", Field::PublicKey),
    ("kid", Field::KeyId),
    ("i", Field::KeyId),
];

fn lookup_field(key: &str) -> Option<Field> {
    FIELD_KEYS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|&(_, field)| field)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AidRecordParseError {
    MalformedToken,
    DuplicateField(Field),
    InvalidVersion,
    InvalidUri,
    InvalidProtocol,
    MissingField(Field),
}

impl AidRecordParseError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedToken => ErrorCode::MalformedToken,
            Self::DuplicateField(_) => ErrorCode::DuplicateField,
            Self::InvalidVersion => ErrorCode::InvalidVersion,
            Self::InvalidUri => ErrorCode::InvalidUri,
            Self::InvalidProtocol => ErrorCode::InvalidProtocol,
            Self::MissingField(_) => ErrorCode::MissingField,
        }
    }
}

impl Display for AidRecordParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedToken => write!(f, "malformed key=value token"),
            Self::DuplicateField(field) => write!(f, "duplicate {field} field"),
            Self::InvalidVersion => write!(f, "missing or unsupported version, expected v={AID_VERSION}"),
            Self::InvalidUri => write!(f, "invalid uri, expected absolute https URI"),
            Self::InvalidProtocol => write!(f, "invalid protocol token"),
            Self::MissingField(field) => write!(f, "{field} field missing"),
        }
    }
}

impl Error for AidRecordParseError {}

/// An AID record, as published in a DNS TXT record.
///
/// A record can only be obtained by parsing, and is immutable thereafter.
/// Equality compares the canonical fields only, not the raw TXT string.
///
/// Besides the required fields, a record may carry informational fields. These
/// are stored as published and are not interpreted.
#[derive(Clone, Debug)]
pub struct AidRecord {
    version: Box<str>,
    uri: Box<str>,
    protocol: Box<str>,
    auth: Option<Box<str>>,
    desc: Option<Box<str>>,
    docs: Option<Box<str>>,
    dep: Option<Box<str>>,
    pka: Option<Box<str>>,
    kid: Option<Box<str>>,
    raw: Box<str>,
}

impl AidRecord {
    /// The record version, always `aid1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The agent endpoint URI, exactly as published.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The protocol served at the endpoint.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// The authentication hint (`auth`, alias `a`), if any.
    pub fn auth(&self) -> Option<&str> {
        self.auth.as_deref()
    }

    /// The human-readable description (`desc`, alias `s`), if any.
    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref()
    }

    /// The documentation URL (`docs`, alias `d`), if any.
    pub fn docs(&self) -> Option<&str> {
        self.docs.as_deref()
    }

    /// The deprecation timestamp (`dep`, alias `e`), if any.
    pub fn dep(&self) -> Option<&str> {
        self.dep.as_deref()
    }

    /// The endpoint public key (`pka`, alias `k`), if any.
    pub fn pka(&self) -> Option<&str> {
        self.pka.as_deref()
    }

    /// The key identifier (`kid`, alias `i`), if any.
    pub fn kid(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    /// The TXT string this record was parsed from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    fn from_tag_list(tag_list: &TagList<'_>, raw: &str) -> Result<Self, AidRecordParseError> {
        let mut version = None;
        let mut uri = None;
        let mut protocol = None;
        let mut auth = None;
        let mut desc = None;
        let mut docs = None;
        let mut dep = None;
        let mut pka = None;
        let mut kid = None;

        for &TagSpec { name, value } in tag_list.as_ref() {
            // Unknown keys are ignored for forward compatibility.
            let Some(field) = lookup_field(name) else {
                continue;
            };

            let slot = match field {
                Field::Version => &mut version,
                Field::Uri => &mut uri,
                Field::Protocol => &mut protocol,
                Field::Auth => &mut auth,
                Field::Description => &mut desc,
                Field::Docs => &mut docs,
                Field::Deprecation => &mut dep,
                Field::PublicKey => &mut pka,
                Field::KeyId => &mut kid,
            };

            if slot.replace(value).is_some() {
                return Err(AidRecordParseError::DuplicateField(field));
            }
        }

        match version {
            Some(AID_VERSION) => {}
            _ => return Err(AidRecordParseError::InvalidVersion),
        }

        let uri = uri.ok_or(AidRecordParseError::MissingField(Field::Uri))?;
        if !is_https_uri(uri) {
            return Err(AidRecordParseError::InvalidUri);
        }

        let protocol = protocol.ok_or(AidRecordParseError::MissingField(Field::Protocol))?;
        if !is_protocol_token(protocol) {
            return Err(AidRecordParseError::InvalidProtocol);
        }

        Ok(Self {
            version: AID_VERSION.into(),
            uri: uri.into(),
            protocol: protocol.into(),
            auth: auth.map(Into::into),
            desc: desc.map(Into::into),
            docs: docs.map(Into::into),
            dep: dep.map(Into::into),
            pka: pka.map(Into::into),
            kid: kid.map(Into::into),
            raw: raw.into(),
        })
    }
}

fn is_https_uri(s: &str) -> bool {
    match Url::parse(s) {
        Ok(url) => url.scheme() == "https" && url.host().is_some(),
        Err(_) => false,
    }
}

impl PartialEq for AidRecord {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.uri == other.uri
            && self.protocol == other.protocol
            && self.auth == other.auth
            && self.desc == other.desc
            && self.docs == other.docs
            && self.dep == other.dep
            && self.pka == other.pka
            && self.kid == other.kid
    }
}

impl Eq for AidRecord {}

impl FromStr for AidRecord {
    type Err = AidRecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag_list =
            TagList::from_str(s).map_err(|_| AidRecordParseError::MalformedToken)?;

        Self::from_tag_list(&tag_list, s)
    }
}

/// Parses a raw TXT string into an AID record.
///
/// This is a pure function: the same input always yields the same record or
/// the same error.
///
/// # Examples
///
/// ```
/// use aid_discovery::{parse, CanonicalStr};
///
/// let record = parse("v=aid1;u=https://api.example.com/mcp;p=mcp")?;
/// assert_eq!(record.uri(), "https://api.example.com/mcp");
/// assert_eq!(record.protocol(), "mcp");
///
/// let error = parse("v=aid1;uri=http://api.example.com/mcp;proto=mcp").unwrap_err();
/// assert_eq!(error.code().canonical_str(), "invalid_uri");
/// # Ok::<_, aid_discovery::record::AidRecordParseError>(())
/// ```
pub fn parse(raw: &str) -> Result<AidRecord, AidRecordParseError> {
    raw.parse()
}
