//! Page fetching module
//!
//! The paginator only needs "give me the markup behind this URL". That
//! capability is the [`PageFetcher`] trait; [`HttpPageFetcher`] is the
//! implementation used against the live search timeline, which answers with a
//! JSON envelope whose `items_html` field carries the markup.

mod http;
mod types;

pub use http::HttpPageFetcher;
pub use types::{decode_payload, PageFetcher, TimelinePayload};
