//! HTTP page fetcher

use super::types::{decode_payload, PageFetcher};
use crate::config::ScraperConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Fetches timeline pages over HTTP and unwraps the JSON envelope
#[derive(Debug)]
pub struct HttpPageFetcher {
    client: HttpClient,
}

impl HttpPageFetcher {
    /// Create a fetcher around an existing client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Create a fetcher from the HTTP section of `config`
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::from(&config.http))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let body = self.client.get_text(url.as_str()).await?;
        debug!(bytes = body.len(), "received timeline payload");
        decode_payload(&body)
    }
}
