use crate::parse::trim_wsp;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Debug, PartialEq, Eq)]
pub struct TagSpec<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// A non-empty token that is not of the form `key=value`.
#[derive(Debug, PartialEq, Eq)]
pub struct MalformedToken;

impl Display for MalformedToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "malformed key=value token")
    }
}

impl Error for MalformedToken {}

/// The `;`-separated tag list of an AID TXT record, in order of appearance.
///
/// Unlike the field level, no duplicate checking is done here: keys are only
/// interpreted once they are mapped to a record field.
#[derive(Debug, PartialEq, Eq)]
pub struct TagList<'a>(Vec<TagSpec<'a>>);

impl<'a> AsRef<[TagSpec<'a>]> for TagList<'a> {
    fn as_ref(&self) -> &[TagSpec<'a>] {
        &self.0
    }
}

impl<'a> TagList<'a> {
    pub fn from_str(val: &'a str) -> Result<Self, MalformedToken> {
        let mut tags = vec![];

        for token in val.split(';') {
            let token = trim_wsp(token);

            // empty tokens, eg from a trailing `;`, carry no information
            if token.is_empty() {
                continue;
            }

            tags.push(parse_tag_spec(token)?);
        }

        Ok(TagList(tags))
    }
}

fn parse_tag_spec(token: &str) -> Result<TagSpec<'_>, MalformedToken> {
    // split at the first `=` only: values such as URIs may contain more
    let (name, value) = token.split_once('=').ok_or(MalformedToken)?;

    let name = trim_wsp(name);
    let value = trim_wsp(value);

    // any non-empty key is accepted here, unknown ones are skipped later
    if name.is_empty() {
        return Err(MalformedToken);
    }

    Ok(TagSpec { name, value })
}
