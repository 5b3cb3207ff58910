//! Search query URLs
//!
//! The timeline endpoint is picky about its query string: parameters appear
//! in a fixed order. Within `q` the search term is query-escaped (spaces as
//! `+`) while the separators around the date filters are written as `%20`.
//! The layout is
//!
//! ```text
//! <search_url>?f=tweets[&max_position=TWEET-<cursor>-<floor>]&q=<q>&src=typd&vertical=default
//! ```
//!
//! where `q` is `<term> since:<YYYY-MM-DD> until:<YYYY-MM-DD>`.

use crate::error::Result;
use crate::pagination::CursorToken;
use chrono::NaiveDate;
use url::{form_urlencoded, Url};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A search over a date range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free-text search, may contain the source's own query operators
    pub term: String,
    /// First day included
    pub since: NaiveDate,
    /// Day the search runs up to
    pub until: NaiveDate,
}

impl SearchQuery {
    /// Create a new query
    pub fn new(term: impl Into<String>, since: NaiveDate, until: NaiveDate) -> Self {
        Self {
            term: term.into(),
            since,
            until,
        }
    }

    /// The raw `q` parameter value, before encoding
    pub fn q(&self) -> String {
        format!(
            "{} since:{} until:{}",
            self.term,
            self.since.format(DATE_FORMAT),
            self.until.format(DATE_FORMAT)
        )
    }

    /// The `q` parameter as it appears on the wire
    pub fn encoded_q(&self) -> String {
        format!(
            "{}%20since%3A{}%20until%3A{}",
            query_escape(&self.term),
            self.since.format(DATE_FORMAT),
            self.until.format(DATE_FORMAT)
        )
    }

    /// Build the page URL; the first page has no cursor
    pub fn url(&self, search_url: &str, cursor: Option<&CursorToken>) -> Result<Url> {
        let separator = if search_url.contains('?') { '&' } else { '?' };
        let mut raw = format!("{search_url}{separator}f=tweets");

        if let Some(cursor) = cursor {
            raw.push_str("&max_position=");
            raw.push_str(&query_escape(&cursor.to_string()));
        }

        raw.push_str("&q=");
        raw.push_str(&self.encoded_q());
        raw.push_str("&src=typd&vertical=default");

        Ok(Url::parse(&raw)?)
    }
}

/// Query-escape a value: spaces become `+`, and only alphanumerics and
/// `-_.~` stay literal.
fn query_escape(value: &str) -> String {
    // form_urlencoded differs on two bytes: it keeps `*` and escapes `~`.
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
        .replace("%7E", "~")
}
