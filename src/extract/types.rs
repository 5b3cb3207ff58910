//! Extraction types and traits

use crate::types::Tweet;

/// Outcome of extracting one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Tweets in document order
    Records(Vec<Tweet>),
    /// The page holds no tweet containers; the source is exhausted
    NoRecords,
}

impl Extraction {
    /// Check if the page was empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Records(tweets) => tweets.is_empty(),
            Self::NoRecords => true,
        }
    }

    /// Number of tweets extracted
    pub fn len(&self) -> usize {
        match self {
            Self::Records(tweets) => tweets.len(),
            Self::NoRecords => 0,
        }
    }

    /// The tweets, or `None` when there are none
    pub fn into_records(self) -> Option<Vec<Tweet>> {
        match self {
            Self::Records(tweets) if !tweets.is_empty() => Some(tweets),
            _ => None,
        }
    }
}

/// Trait for turning page markup into tweets
pub trait RecordExtractor: Send + Sync {
    /// Extract the tweets of one page. Per-field problems are absorbed;
    /// this never fails.
    fn extract(&self, markup: &str) -> Extraction;
}
