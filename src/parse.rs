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

//! Common parsing utilities.

/// Strips leading and trailing ASCII whitespace, including line breaks.
pub fn trim_wsp(input: &str) -> &str {
    input.trim_matches(is_wsp)
}

pub fn is_wsp(c: char) -> bool {
    c.is_ascii_whitespace()
}

// A-label domain names, as used in DNS queries.

const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_LABEL_LENGTH: usize = 63;

pub fn is_valid_dns_name(s: &str) -> bool {
    matches!(s.len(), 1..=MAX_DOMAIN_LENGTH) && s.split('.').all(is_label)
}

fn is_label(s: &str) -> bool {
    matches!(s.len(), 1..=MAX_LABEL_LENGTH)
        && s.starts_with(|c: char| c.is_ascii_alphanumeric())
        && s.ends_with(|c: char| c.is_ascii_alphanumeric())
        && s.chars().all(|c: char| c.is_ascii_alphanumeric() || c == '-')
}

/// Whether the string is a protocol token: one or more lowercase ASCII
/// letters, digits, or hyphens.
pub fn is_protocol_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
