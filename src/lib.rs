//! # twitscrape
//!
//! Fetch every tweet matching a search term over a date range from the
//! public search timeline, without an API key.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Follows the `max_position` cursor until the source
//!   runs dry or starts repeating itself
//! - **Positional Extraction**: Correlates identity, timestamp and text
//!   fragments of a page by document order
//! - **Retrying HTTP**: Timeouts, retries and backoff on transient failures
//! - **Output**: JSON, JSON Lines, or an aligned table
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use twitscrape::{ScrapeEngine, ScraperConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let engine = ScrapeEngine::new(&ScraperConfig::default())?;
//!
//!     let since = NaiveDate::from_ymd_opt(2009, 11, 10).unwrap();
//!     let until = NaiveDate::from_ymd_opt(2009, 11, 11).unwrap();
//!     for tweet in engine.tweets("#golang", since, until).await? {
//!         println!("{} {}", tweet.permalink, tweet.contents);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        CursorPaginator                          │
//! │  SearchQuery + CursorState → URL → PageFetcher → RecordExtractor│
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌─────────────┬────────────────┴───────┬──────────────┬──────────┐
//! │    Query    │         Fetch          │   Extract    │  Output  │
//! ├─────────────┼────────────────────────┼──────────────┼──────────┤
//! │ q encoding  │ HttpClient + retry     │ identity     │ JSON     │
//! │ param order │ items_html envelope    │ timestamps   │ JSONL    │
//! │ cursor token│                        │ contents     │ Table    │
//! └─────────────┴────────────────────────┴──────────────┴──────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Configuration file loading
pub mod config;

/// Optional progress and warning channel
pub mod diagnostics;

/// HTTP client with retry
pub mod http;

/// Search query URLs
pub mod query;

/// Page fetching
pub mod fetch;

/// Tweet extraction from page markup
pub mod extract;

/// Cursor pagination
pub mod pagination;

/// Configured scrape runner
pub mod engine;

/// JSON and table output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, ScraperConfig};
pub use diagnostics::{DiagnosticSink, Diagnostics};
pub use engine::ScrapeEngine;
pub use error::{Error, Result};
pub use extract::{Extraction, RecordExtractor, TweetExtractor};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use pagination::{CursorPaginator, ScrapeOutcome};
pub use query::SearchQuery;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
