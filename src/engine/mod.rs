//! Scrape engine module
//!
//! Wires the configured parts together.
//!
//! # Overview
//!
//! The engine module provides:
//! - `ScrapeEngine` - builds the HTTP fetcher, the extractor and the paginator
//!   from a `ScraperConfig` and runs searches with them

use crate::config::ScraperConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::extract::TweetExtractor;
use crate::fetch::{HttpPageFetcher, PageFetcher};
use crate::pagination::{CursorPaginator, ScrapeOutcome};
use crate::query::SearchQuery;
use crate::types::Tweet;
use chrono::NaiveDate;
use tracing::info;

/// Search runner built from configuration
#[derive(Debug)]
pub struct ScrapeEngine {
    paginator: CursorPaginator,
}

impl ScrapeEngine {
    /// Create an engine that fetches over HTTP
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Self::with_diagnostics(config, Diagnostics::none())
    }

    /// Create an engine that reports progress and soft failures to `diagnostics`
    pub fn with_diagnostics(config: &ScraperConfig, diagnostics: Diagnostics) -> Result<Self> {
        let fetcher = HttpPageFetcher::from_config(config)?;
        Self::with_fetcher(config, fetcher, diagnostics)
    }

    /// Create an engine around any page fetcher
    pub fn with_fetcher(
        config: &ScraperConfig,
        fetcher: impl PageFetcher + 'static,
        diagnostics: Diagnostics,
    ) -> Result<Self> {
        config.validate()?;

        let extractor = TweetExtractor::new(config)?.with_diagnostics(diagnostics.clone());
        let paginator = CursorPaginator::new(fetcher, extractor, config.search_url.clone())
            .with_max_pages(config.max_pages)
            .with_diagnostics(diagnostics);

        Ok(Self { paginator })
    }

    /// The underlying paginator
    pub fn paginator(&self) -> &CursorPaginator {
        &self.paginator
    }

    /// Fetch every tweet for `search` between `since` and `until`
    pub async fn tweets(
        &self,
        search: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Tweet>> {
        self.paginator.fetch_all(search, since, until).await
    }

    /// Run `query`, returning tweets and statistics
    pub async fn run(&self, query: &SearchQuery) -> Result<ScrapeOutcome> {
        info!(q = %query.q(), "starting search");
        self.paginator.fetch_all_with_stats(query).await
    }
}
