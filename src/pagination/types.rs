//! Pagination types
//!
//! Cursor bookkeeping and stop decisions used by the paginator.

use crate::types::Tweet;
use serde::Serialize;
use std::fmt;

/// The `max_position` value asking for the page after `cursor_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorToken {
    /// Id of the last tweet already seen
    pub cursor_id: String,
    /// Id of the first tweet seen in this run
    pub floor_id: String,
}

impl CursorToken {
    /// Create a token
    pub fn new(cursor_id: impl Into<String>, floor_id: impl Into<String>) -> Self {
        Self {
            cursor_id: cursor_id.into(),
            floor_id: floor_id.into(),
        }
    }
}

impl fmt::Display for CursorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TWEET-{}-{}", self.cursor_id, self.floor_id)
    }
}

/// Result of observing a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopResult {
    /// Continue pagination
    Continue,
    /// Stop pagination
    Stop,
}

impl StopResult {
    /// Check if we should stop
    pub fn should_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A page came back without tweets
    #[default]
    Exhausted,
    /// The last tweet of a page was the floor tweet
    ReachedFloor,
    /// The configured page limit was hit
    PageLimit,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Exhausted => "source exhausted",
            Self::ReachedFloor => "cursor reached floor",
            Self::PageLimit => "page limit reached",
        };
        f.write_str(reason)
    }
}

/// Cursor state for a single run.
///
/// `floor_id` is written once, from the first tweet of the first non-empty
/// page. `cursor_id` follows the last tweet of every page.
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    floor_id: Option<String>,
    cursor_id: Option<String>,
    /// Pages fetched, including the final empty one
    pub pages: u32,
    /// Tweets observed so far
    pub total_fetched: usize,
}

impl CursorState {
    /// Create a fresh state; the first request carries no cursor
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the first tweet seen, once known
    pub fn floor_id(&self) -> Option<&str> {
        self.floor_id.as_deref()
    }

    /// Id of the last tweet seen, once known
    pub fn cursor_id(&self) -> Option<&str> {
        self.cursor_id.as_deref()
    }

    /// Token for the next request, `None` before the first page
    pub fn token(&self) -> Option<CursorToken> {
        let cursor_id = self.cursor_id.as_ref()?;
        let floor_id = self.floor_id.as_deref().unwrap_or_default();
        Some(CursorToken::new(cursor_id.clone(), floor_id))
    }

    /// Count a fetched page
    pub fn add_page(&mut self) {
        self.pages += 1;
    }

    /// Record the tweets of a non-empty page and decide whether to go on.
    ///
    /// Stops when the page ends on the floor tweet: asking for the page after
    /// it would return the same page again.
    pub fn observe(&mut self, page: &[Tweet]) -> StopResult {
        let (Some(first), Some(last)) = (page.first(), page.last()) else {
            return StopResult::Stop;
        };

        if self.floor_id.is_none() {
            self.floor_id = Some(first.id.clone());
        }
        self.cursor_id = Some(last.id.clone());
        self.total_fetched += page.len();

        if self.cursor_id == self.floor_id {
            StopResult::Stop
        } else {
            StopResult::Continue
        }
    }
}

/// Statistics from a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScrapeStats {
    /// Pages requested
    pub pages_fetched: u32,
    /// Tweets returned
    pub records: usize,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Why the run ended
    pub stop_reason: StopReason,
}
