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

use super::{LookupTxt, TxtAnswer};
use hickory_resolver::{error::ResolveErrorKind, Name, TokioAsyncResolver};
use std::{
    future::Future,
    io::{self, ErrorKind},
    pin::Pin,
};

impl LookupTxt for TokioAsyncResolver {
    type Answer = Vec<io::Result<Vec<u8>>>;
    type Query<'a> = Pin<Box<dyn Future<Output = io::Result<TxtAnswer<Self::Answer>>> + Send + 'a>>;

    fn lookup_txt(&self, domain: &str) -> Self::Query<'_> {
        // Note the trailing dot: only absolute queries.
        let name = Name::from_ascii(format!("{domain}."));

        Box::pin(async move {
            let name = name.map_err(|_| ErrorKind::InvalidInput)?;

            let lookup = self.txt_lookup(name).await.map_err(|e| match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => io::Error::from(ErrorKind::NotFound),
                _ => e.into(),
            })?;

            // The record set TTL: the smallest TTL among the TXT records.
            let ttl = lookup
                .as_lookup()
                .record_iter()
                .filter(|r| r.data().and_then(|d| d.as_txt()).is_some())
                .map(|r| r.ttl())
                .min()
                .unwrap_or_default();

            let txts = lookup.iter().map(|txt| Ok(txt.txt_data().concat())).collect();

            Ok(TxtAnswer::new(txts, ttl))
        })
    }
}
