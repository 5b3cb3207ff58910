//! Cursor-tracking fetch loop

use super::types::{CursorState, ScrapeStats, StopReason};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::extract::RecordExtractor;
use crate::fetch::PageFetcher;
use crate::query::SearchQuery;
use crate::types::Tweet;
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Tweets and statistics of one run
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// Tweets in fetch order
    pub tweets: Vec<Tweet>,
    /// Run statistics
    pub stats: ScrapeStats,
}

/// Drives repeated fetch and extract cycles for a search.
///
/// The paginator itself is immutable; every call to [`fetch_all`] owns its
/// own [`CursorState`], so concurrent runs never share cursors.
///
/// [`fetch_all`]: CursorPaginator::fetch_all
pub struct CursorPaginator {
    fetcher: Box<dyn PageFetcher>,
    extractor: Box<dyn RecordExtractor>,
    search_url: String,
    max_pages: Option<u32>,
    diagnostics: Diagnostics,
}

impl CursorPaginator {
    /// Create a paginator for the endpoint at `search_url`
    pub fn new(
        fetcher: impl PageFetcher + 'static,
        extractor: impl RecordExtractor + 'static,
        search_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            extractor: Box::new(extractor),
            search_url: search_url.into(),
            max_pages: None,
            diagnostics: Diagnostics::none(),
        }
    }

    /// Stop after `max_pages` pages
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Write progress lines to `diagnostics`
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Fetch every tweet matching `search` between `since` and `until`.
    ///
    /// Returns the tweets in the order the source served them. Any fetch
    /// failure aborts the run and discards what was collected.
    pub async fn fetch_all(
        &self,
        search: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<Tweet>> {
        let query = SearchQuery::new(search, since, until);
        Ok(self.fetch_all_with_stats(&query).await?.tweets)
    }

    /// Like [`fetch_all`](Self::fetch_all), also reporting statistics
    pub async fn fetch_all_with_stats(&self, query: &SearchQuery) -> Result<ScrapeOutcome> {
        let start = Instant::now();
        let mut state = CursorState::new();
        let mut tweets = Vec::new();

        let stop_reason = loop {
            if self.max_pages.is_some_and(|max| state.pages >= max) {
                warn!(pages = state.pages, "page limit reached, stopping early");
                break StopReason::PageLimit;
            }

            let url = query.url(&self.search_url, state.token().as_ref())?;
            self.diagnostics.emit(format_args!("fetching {url}"));

            let markup = self.fetcher.fetch(&url).await?;
            state.add_page();

            let Some(page) = self.extractor.extract(&markup).into_records() else {
                debug!(pages = state.pages, "empty page, source exhausted");
                break StopReason::Exhausted;
            };

            self.diagnostics
                .emit(format_args!("{} tweets processed", page.len()));

            let result = state.observe(&page);
            tweets.extend(page);

            if result.should_stop() {
                debug!(
                    cursor = state.cursor_id().unwrap_or_default(),
                    "cursor reached floor"
                );
                break StopReason::ReachedFloor;
            }
        };

        let stats = ScrapeStats {
            pages_fetched: state.pages,
            records: state.total_fetched,
            duration_ms: start.elapsed().as_millis() as u64,
            stop_reason,
        };
        info!(
            pages = stats.pages_fetched,
            tweets = stats.records,
            reason = %stats.stop_reason,
            "scrape complete"
        );

        Ok(ScrapeOutcome { tweets, stats })
    }
}

impl std::fmt::Debug for CursorPaginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorPaginator")
            .field("search_url", &self.search_url)
            .field("max_pages", &self.max_pages)
            .field("diagnostics", &self.diagnostics)
            .finish_non_exhaustive()
    }
}
