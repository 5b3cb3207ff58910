//! Output module
//!
//! Renders scraped tweets for people and for other programs.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Writing tweets as a JSON array or as JSON Lines
//! - Writing an aligned `Timestamp  Permalink  Contents` table
//! - Sorting tweets chronologically

mod writer;

pub use writer::{sort_by_timestamp, OutputFormat, TweetWriter, TABLE_TIME_FORMAT};
