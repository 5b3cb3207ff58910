//! Tweet extraction module
//!
//! Turns one page of timeline markup into an ordered list of tweets.
//!
//! # Overview
//!
//! A page exposes three independent sets of fragments: the tweet containers
//! (identity), the timestamp anchors and the text containers. Nothing links a
//! timestamp or a text fragment to its tweet except document order, so the
//! extractor correlates them by index. The identity pass fixes the number of
//! tweets; the other two passes only fill fields and never add, drop or shift
//! entries.

mod extractor;
mod types;

pub use extractor::TweetExtractor;
pub use types::{Extraction, RecordExtractor};
