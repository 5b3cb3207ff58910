//! Three-pass positional extractor

use super::types::{Extraction, RecordExtractor};
use crate::config::ScraperConfig;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::types::Tweet;
use chrono::{DateTime, NaiveDateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use std::fmt;
use tracing::warn;

/// Minimum segments of a permalink path split on `/`:
/// `["", handle, "status", id]`.
const PERMALINK_SEGMENTS: usize = 4;
const PERMALINK_ATTR: &str = "data-permalink-path";
const TIMESTAMP_ATTR: &str = "title";

/// Extracts tweets from search timeline markup
pub struct TweetExtractor {
    tweet: Selector,
    timestamp: Selector,
    content: Selector,
    permalink_base: String,
    timestamp_format: String,
    diagnostics: Diagnostics,
}

impl TweetExtractor {
    /// Compile the selectors from `config`
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            tweet: parse_selector(&config.selectors.tweet)?,
            timestamp: parse_selector(&config.selectors.timestamp)?,
            content: parse_selector(&config.selectors.content)?,
            permalink_base: config.permalink_base.trim_end_matches('/').to_string(),
            timestamp_format: config.timestamp_format.clone(),
            diagnostics: Diagnostics::none(),
        })
    }

    /// Report soft failures to `diagnostics`
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Parse a timestamp `title` attribute, e.g. `3:26 PM - 10 Nov 2009`
    pub fn parse_timestamp(&self, title: &str) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(title.trim(), &self.timestamp_format)
            .ok()
            .map(|naive| naive.and_utc())
    }

    fn soft_failure(&self, args: fmt::Arguments<'_>) {
        warn!("{args}");
        self.diagnostics.emit(args);
    }

    // Pass 1. Must run before the other two: it creates the tweets they fill.
    fn identity(&self, index: usize, element: ElementRef<'_>) -> Tweet {
        let Some(path) = element.value().attr(PERMALINK_ATTR) else {
            self.soft_failure(format_args!("tweet {index}: could not get permalink"));
            return Tweet::placeholder();
        };

        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() < PERMALINK_SEGMENTS {
            self.soft_failure(format_args!(
                "tweet {index}: permalink {path} was not in correct format"
            ));
            return Tweet::placeholder();
        }

        Tweet::new(
            format!("{}{path}", self.permalink_base),
            segments[1],
            segments[3],
        )
    }

    // Pass 2
    fn fill_timestamps(&self, document: &Html, tweets: &mut [Tweet]) {
        let count = tweets.len();
        for (index, element) in document.select(&self.timestamp).enumerate() {
            let Some(tweet) = tweets.get_mut(index) else {
                self.soft_failure(format_args!(
                    "timestamp: found {} timestamps, only {count} tweets exist",
                    index + 1
                ));
                continue;
            };

            let Some(title) = element.value().attr(TIMESTAMP_ATTR) else {
                self.soft_failure(format_args!("tweet {index}: could not get timestamp"));
                continue;
            };

            tweet.timestamp = self.parse_timestamp(title);
            if tweet.timestamp.is_none() {
                self.soft_failure(format_args!(
                    "tweet {index}: timestamp: could not parse time {title}"
                ));
            }
        }
    }

    // Pass 3
    fn fill_contents(&self, document: &Html, tweets: &mut [Tweet]) {
        let count = tweets.len();
        for (index, element) in document.select(&self.content).enumerate() {
            let Some(tweet) = tweets.get_mut(index) else {
                self.soft_failure(format_args!(
                    "text: found {} contents, only {count} tweets exist",
                    index + 1
                ));
                continue;
            };

            let text = element.text().collect::<String>();
            let text = text.trim();
            if text.is_empty() {
                self.soft_failure(format_args!("tweet {index}: contents were empty"));
                continue;
            }
            tweet.contents = text.to_string();
        }
    }
}

impl RecordExtractor for TweetExtractor {
    fn extract(&self, markup: &str) -> Extraction {
        let document = Html::parse_document(markup);

        let mut tweets: Vec<Tweet> = document
            .select(&self.tweet)
            .enumerate()
            .map(|(index, element)| self.identity(index, element))
            .collect();

        if tweets.is_empty() {
            return Extraction::NoRecords;
        }

        self.fill_timestamps(&document, &mut tweets);
        self.fill_contents(&document, &mut tweets);

        Extraction::Records(tweets)
    }
}

impl fmt::Debug for TweetExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweetExtractor")
            .field("permalink_base", &self.permalink_base)
            .field("timestamp_format", &self.timestamp_format)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::invalid_selector(selector, e.to_string()))
}
