//! Fetcher trait and payload types

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use url::Url;

/// Retrieves the raw markup of one page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its markup.
    ///
    /// Transport failures surface as `Error::Http`, `Error::HttpStatus` or
    /// `Error::Timeout`; an unreadable payload as `Error::Decode`.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    async fn fetch(&self, url: &Url) -> Result<String> {
        (**self).fetch(url).await
    }
}

/// JSON envelope returned by the search timeline endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimelinePayload {
    /// Markup of the tweets on this page
    #[serde(default)]
    pub items_html: Option<String>,
}

/// Extract the markup from a timeline response body.
///
/// A body that is not a JSON object is a decode error. A missing or null
/// `items_html` decodes to empty markup, which extracts to no tweets.
pub fn decode_payload(body: &str) -> Result<String> {
    let payload: TimelinePayload = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("could not decode timeline payload: {e}")))?;
    Ok(payload.items_html.unwrap_or_default())
}
