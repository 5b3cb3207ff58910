//! Common types used throughout twitscrape
//!
//! This module contains the record type produced by the scraper and a few
//! shared enums used by the HTTP and configuration layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Tweet
// ============================================================================

/// A single tweet retrieved from the archive.
///
/// Fields that could not be extracted from the page are left empty (or `None`
/// for the timestamp) rather than causing the tweet to be dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tweet {
    /// Link to the tweet, e.g. `https://www.twitter.com/user/status/123`
    pub permalink: String,
    /// Screen name (handle) of the author
    pub name: String,
    /// Time the tweet was posted, in UTC
    pub timestamp: Option<DateTime<Utc>>,
    /// Text of the tweet
    pub contents: String,
    /// Tweet ID, opaque text
    pub id: String,
}

impl Tweet {
    /// Create a tweet with identity fields only
    pub fn new(
        permalink: impl Into<String>,
        name: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            permalink: permalink.into(),
            name: name.into(),
            id: id.into(),
            ..Default::default()
        }
    }

    /// Placeholder for a fragment whose identity could not be read
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// True when no field was extracted
    pub fn is_placeholder(&self) -> bool {
        *self == Self::default()
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
