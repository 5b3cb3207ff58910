//! Pagination module
//!
//! The search timeline hands out at most ~20 tweets per response and no
//! usable "next page" token. The cursor is synthesised from tweet ids seen so
//! far: the id of the very first tweet (the floor, fixed for the whole run)
//! and the id of the last tweet of the latest page (the cursor).
//!
//! # Overview
//!
//! - [`CursorState`] tracks floor and cursor for one run and decides when the
//!   run is over.
//! - [`CursorPaginator`] drives fetch → extract → advance until the source is
//!   exhausted or the cursor lands back on the floor.

mod paginator;
mod types;

pub use paginator::{CursorPaginator, ScrapeOutcome};
pub use types::{CursorState, CursorToken, ScrapeStats, StopReason, StopResult};

#[cfg(test)]
mod tests;
