//! Tests for pagination module

use super::*;
use crate::config::ScraperConfig;
use crate::diagnostics::{Diagnostics, MemorySink};
use crate::error::{Error, Result};
use crate::extract::TweetExtractor;
use crate::fetch::PageFetcher;
use crate::types::Tweet;
use async_trait::async_trait;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use url::Url;

const SEARCH_URL: &str = "https://twitter.com/i/search/timeline";

// ============================================================================
// Test Doubles
// ============================================================================

/// Serves scripted responses in order and records every requested URL.
/// Once the script runs out it serves empty pages.
#[derive(Default)]
struct ScriptedFetcher {
    responses: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    fn new(responses: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn pages(pages: &[&[&str]]) -> Arc<Self> {
        Self::new(pages.iter().map(|ids| Ok(page(ids))).collect())
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

fn page(ids: &[&str]) -> String {
    ids.iter()
        .map(|id| {
            format!(
                r#"<div class="tweet js-stream-tweet js-actionable-tweet js-profile-popup-actionable original-tweet js-original-tweet" data-permalink-path="/user{id}/status/{id}"></div>"#
            )
        })
        .collect()
}

fn paginator(fetcher: &Arc<ScriptedFetcher>) -> CursorPaginator {
    let extractor = TweetExtractor::new(&ScraperConfig::default()).unwrap();
    CursorPaginator::new(fetcher.clone(), extractor, SEARCH_URL)
}

fn dates() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2009, 11, 10).unwrap(),
        NaiveDate::from_ymd_opt(2009, 11, 11).unwrap(),
    )
}

fn ids(tweets: &[Tweet]) -> Vec<&str> {
    tweets.iter().map(|t| t.id.as_str()).collect()
}

fn max_position(url: &str) -> Option<String> {
    Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(key, _)| key == "max_position")
        .map(|(_, value)| value.into_owned())
}

// ============================================================================
// CursorToken / StopResult Tests
// ============================================================================

#[test]
fn test_cursor_token_display() {
    let token = CursorToken::new("5602929333", "5603770675");
    assert_eq!(token.to_string(), "TWEET-5602929333-5603770675");
}

#[test]
fn test_stop_result_helpers() {
    assert!(!StopResult::Continue.should_stop());
    assert!(StopResult::Stop.should_stop());
}

#[test]
fn test_stop_reason_display() {
    assert_eq!(StopReason::Exhausted.to_string(), "source exhausted");
    assert_eq!(StopReason::ReachedFloor.to_string(), "cursor reached floor");
    assert_eq!(StopReason::PageLimit.to_string(), "page limit reached");
}

// ============================================================================
// CursorState Tests
// ============================================================================

#[test]
fn test_cursor_state_default() {
    let state = CursorState::new();
    assert!(state.floor_id().is_none());
    assert!(state.cursor_id().is_none());
    assert!(state.token().is_none());
    assert_eq!(state.pages, 0);
    assert_eq!(state.total_fetched, 0);
}

#[test]
fn test_cursor_state_floor_is_set_once() {
    let mut state = CursorState::new();

    let first = [Tweet::new("", "", "30"), Tweet::new("", "", "20")];
    assert_eq!(state.observe(&first), StopResult::Continue);
    assert_eq!(state.floor_id(), Some("30"));
    assert_eq!(state.cursor_id(), Some("20"));

    let second = [Tweet::new("", "", "19"), Tweet::new("", "", "10")];
    assert_eq!(state.observe(&second), StopResult::Continue);
    assert_eq!(state.floor_id(), Some("30"));
    assert_eq!(state.cursor_id(), Some("10"));
    assert_eq!(state.token(), Some(CursorToken::new("10", "30")));
    assert_eq!(state.total_fetched, 4);
}

#[test]
fn test_cursor_state_single_tweet_page_stops() {
    let mut state = CursorState::new();
    assert_eq!(state.observe(&[Tweet::new("", "", "7")]), StopResult::Stop);
}

#[test]
fn test_cursor_state_stops_when_page_ends_on_floor() {
    let mut state = CursorState::new();
    state.observe(&[Tweet::new("", "", "9"), Tweet::new("", "", "8")]);
    let result = state.observe(&[Tweet::new("", "", "8"), Tweet::new("", "", "9")]);
    assert_eq!(result, StopResult::Stop);
}

#[test]
fn test_cursor_state_empty_page_stops_without_changes() {
    let mut state = CursorState::new();
    assert_eq!(state.observe(&[]), StopResult::Stop);
    assert!(state.floor_id().is_none());
    assert!(state.token().is_none());
}

#[test]
fn test_cursor_state_placeholder_ids_still_advance() {
    let mut state = CursorState::new();
    state.observe(&[Tweet::new("", "", "5"), Tweet::placeholder()]);
    assert_eq!(state.token(), Some(CursorToken::new("", "5")));
}

// ============================================================================
// CursorPaginator Tests
// ============================================================================

#[tokio::test]
async fn test_first_request_has_no_cursor_and_later_ones_do() {
    let fetcher = ScriptedFetcher::pages(&[&["30", "29", "28"], &["27", "26"], &["25"]]);
    let (since, until) = dates();

    let tweets = paginator(&fetcher)
        .fetch_all("#golang", since, until)
        .await
        .unwrap();

    assert_eq!(ids(&tweets), vec!["30", "29", "28", "27", "26", "25"]);

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(max_position(&requests[0]), None);
    assert_eq!(max_position(&requests[1]).as_deref(), Some("TWEET-28-30"));
    assert_eq!(max_position(&requests[2]).as_deref(), Some("TWEET-26-30"));
    assert_eq!(max_position(&requests[3]).as_deref(), Some("TWEET-25-30"));
}

#[tokio::test]
async fn test_single_tweet_page_terminates_without_refetch() {
    let fetcher = ScriptedFetcher::pages(&[&["42"], &["42"], &["42"]]);
    let (since, until) = dates();

    let outcome = paginator(&fetcher)
        .fetch_all_with_stats(&crate::query::SearchQuery::new("x", since, until))
        .await
        .unwrap();

    assert_eq!(ids(&outcome.tweets), vec!["42"]);
    assert_eq!(fetcher.requests().len(), 1);
    assert_eq!(outcome.stats.stop_reason, StopReason::ReachedFloor);
    assert_eq!(outcome.stats.pages_fetched, 1);
}

#[tokio::test]
async fn test_page_ending_on_floor_terminates() {
    // The source wraps around and serves the floor tweet last.
    let fetcher = ScriptedFetcher::pages(&[&["9", "8"], &["7", "9"], &["6"]]);
    let (since, until) = dates();

    let tweets = paginator(&fetcher)
        .fetch_all("x", since, until)
        .await
        .unwrap();

    assert_eq!(ids(&tweets), vec!["9", "8", "7", "9"]);
    assert_eq!(fetcher.requests().len(), 2);
}

#[tokio::test]
async fn test_floor_never_reappearing_runs_until_exhaustion() {
    let fetcher = ScriptedFetcher::pages(&[&["50", "49"], &["48", "47"], &["46", "45"]]);
    let (since, until) = dates();

    let outcome = paginator(&fetcher)
        .fetch_all_with_stats(&crate::query::SearchQuery::new("x", since, until))
        .await
        .unwrap();

    assert_eq!(outcome.tweets.len(), 6);
    assert_eq!(outcome.stats.stop_reason, StopReason::Exhausted);
    // Three pages with tweets plus the empty one that ends the run.
    assert_eq!(outcome.stats.pages_fetched, 4);
    assert_eq!(outcome.stats.records, 6);
    assert_eq!(fetcher.requests().len(), 4);
}

#[tokio::test]
async fn test_empty_first_page_returns_nothing() {
    let fetcher = ScriptedFetcher::pages(&[]);
    let (since, until) = dates();

    let tweets = paginator(&fetcher)
        .fetch_all("nothing", since, until)
        .await
        .unwrap();

    assert!(tweets.is_empty());
    assert_eq!(fetcher.requests().len(), 1);
}

#[tokio::test]
async fn test_hard_failure_discards_collected_tweets() {
    let fetcher = ScriptedFetcher::new(vec![
        Ok(page(&["3", "2"])),
        Err(Error::http_status(503, "unavailable")),
    ]);
    let (since, until) = dates();

    let err = paginator(&fetcher)
        .fetch_all("x", since, until)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 503, .. }));
    assert_eq!(fetcher.requests().len(), 2);
}

#[tokio::test]
async fn test_decode_failure_on_first_page() {
    let fetcher = ScriptedFetcher::new(vec![Err(Error::decode("not json"))]);
    let (since, until) = dates();

    let err = paginator(&fetcher)
        .fetch_all("x", since, until)
        .await
        .unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_malformed_search_url_fails_before_fetching() {
    let fetcher = ScriptedFetcher::pages(&[&["1"]]);
    let extractor = TweetExtractor::new(&ScraperConfig::default()).unwrap();
    let paginator = CursorPaginator::new(fetcher.clone(), extractor, "::not a url::");
    let (since, until) = dates();

    let err = paginator.fetch_all("x", since, until).await.unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
    assert!(fetcher.requests().is_empty());
}

#[tokio::test]
async fn test_max_pages_stops_early() {
    let fetcher = ScriptedFetcher::pages(&[&["9", "8"], &["7", "6"], &["5", "4"]]);
    let (since, until) = dates();

    let outcome = paginator(&fetcher)
        .with_max_pages(Some(2))
        .fetch_all_with_stats(&crate::query::SearchQuery::new("x", since, until))
        .await
        .unwrap();

    assert_eq!(ids(&outcome.tweets), vec!["9", "8", "7", "6"]);
    assert_eq!(outcome.stats.stop_reason, StopReason::PageLimit);
    assert_eq!(outcome.stats.records, 4);
    assert_eq!(fetcher.requests().len(), 2);
}

#[tokio::test]
async fn test_placeholder_tweets_are_kept() {
    let broken = r#"<div class="tweet js-stream-tweet js-actionable-tweet js-profile-popup-actionable original-tweet js-original-tweet" data-permalink-path="/oops"></div>"#;
    let fetcher = ScriptedFetcher::new(vec![Ok(format!("{}{broken}{}", page(&["3"]), page(&["1"])))]);
    let (since, until) = dates();

    let tweets = paginator(&fetcher)
        .fetch_all("x", since, until)
        .await
        .unwrap();

    assert_eq!(ids(&tweets), vec!["3", "", "1"]);
    assert!(tweets[1].is_placeholder());
}

#[tokio::test]
async fn test_runs_are_independent_and_repeatable() {
    let script = || vec![Ok(page(&["30", "29"])), Ok(page(&["28", "27"]))];
    let fetcher = ScriptedFetcher::new(script());
    let (since, until) = dates();
    let paginator = paginator(&fetcher);

    let first = paginator.fetch_all("x", since, until).await.unwrap();

    // Rewind the source to the same content for a second run.
    fetcher.responses.lock().unwrap().extend(script());
    let second = paginator.fetch_all("x", since, until).await.unwrap();

    assert_eq!(first, second);

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 6);
    // The second run starts again without a cursor.
    assert_eq!(max_position(&requests[3]), None);
    assert_eq!(max_position(&requests[4]).as_deref(), Some("TWEET-29-30"));
}

#[tokio::test]
async fn test_concurrent_runs_keep_separate_cursors() {
    let left = ScriptedFetcher::pages(&[&["10", "9"], &["8"]]);
    let right = ScriptedFetcher::pages(&[&["100", "99"], &["98"]]);
    let (since, until) = dates();
    let left_paginator = paginator(&left);
    let right_paginator = paginator(&right);

    let (a, b) = tokio::join!(
        left_paginator.fetch_all("a", since, until),
        right_paginator.fetch_all("b", since, until),
    );

    assert_eq!(ids(&a.unwrap()), vec!["10", "9", "8"]);
    assert_eq!(ids(&b.unwrap()), vec!["100", "99", "98"]);
    assert_eq!(max_position(&left.requests()[1]).as_deref(), Some("TWEET-9-10"));
    assert_eq!(max_position(&right.requests()[1]).as_deref(), Some("TWEET-99-100"));
}

#[tokio::test]
async fn test_diagnostics_lines() {
    let fetcher = ScriptedFetcher::pages(&[&["3", "2"]]);
    let sink = Arc::new(MemorySink::new());
    let (since, until) = dates();

    paginator(&fetcher)
        .with_diagnostics(Diagnostics::new(sink.clone()))
        .fetch_all("#golang", since, until)
        .await
        .unwrap();

    let base = "https://twitter.com/i/search/timeline?f=tweets";
    let q = "q=%23golang%20since%3A2009-11-10%20until%3A2009-11-11&src=typd&vertical=default";
    assert_eq!(
        sink.lines(),
        vec![
            format!("fetching {base}&{q}"),
            "2 tweets processed".to_string(),
            format!("fetching {base}&max_position=TWEET-2-3&{q}"),
        ]
    );
}

#[tokio::test]
async fn test_without_diagnostics_nothing_is_written() {
    let fetcher = ScriptedFetcher::pages(&[&["3", "2"]]);
    let (since, until) = dates();

    let paginator = paginator(&fetcher);
    assert!(format!("{paginator:?}").contains("enabled: false"));
    paginator.fetch_all("x", since, until).await.unwrap();
}
