//! Pagination metadata
//!
//! The upstream API communicates collection boundaries through an RFC 5988
//! `Link` response header whose `rel="last"` entry names the terminal page
//! number and the server-chosen page size. This module extracts that
//! metadata so the connector can fan out the remaining page fetches.
//!
//! The cursor is derived per-request from the response headers and consumed
//! once; nothing here is stored between calls.

use reqwest::header::{HeaderMap, LINK};
use url::Url;

use crate::types::Params;

/// The `rel="last"` entry of a paginated response
///
/// Carries the terminal page number and the last link's own query
/// parameters. Those parameters, not the caller's originals, are
/// authoritative for follow-up page requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastPage {
    /// Terminal page number
    pub page: u32,
    /// Query parameters from the last link, excluding `page`
    query: Params,
}

impl LastPage {
    /// Extract the last-page link from response headers
    ///
    /// Returns `None` when the header is absent, has no `last` rel, or its
    /// URL or page number cannot be parsed — all of which mean the
    /// collection fits in a single page.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = headers.get(LINK)?.to_str().ok()?;
        let last_url = rel_url(header, "last")?;
        let url = Url::parse(&last_url).ok()?;

        let mut page = None;
        let mut query = Params::new();
        for (key, value) in url.query_pairs() {
            if key == "page" {
                page = value.parse::<u32>().ok();
            } else {
                query.push((key.into_owned(), value.into_owned()));
            }
        }

        Some(Self { page: page?, query })
    }

    /// Query parameters for a specific page of the collection
    pub fn query_for(&self, page: u32) -> Params {
        let mut query = self.query.clone();
        query.push(("page".to_string(), page.to_string()));
        query
    }
}

/// Parse a Link header and extract the URL for the given rel
///
/// Header format: `<url>; rel="next", <url>; rel="last"`
fn rel_url(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}
