//! Scraper configuration
//!
//! Everything the scraper needs to know about the search endpoint and its
//! markup lives here, so a change on the source side is a config change
//! rather than a code change. Configuration can be loaded from YAML or JSON;
//! every field has a default matching the public Twitter search timeline.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// Top-Level Scraper Config
// ============================================================================

/// Complete scraper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Search timeline endpoint, without query string
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Prefix joined with a tweet's permalink path
    #[serde(default = "default_permalink_base")]
    pub permalink_base: String,

    /// Format of the timestamp `title` attribute (chrono syntax)
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Stop after this many pages, even if the source has more
    #[serde(default)]
    pub max_pages: Option<u32>,

    /// CSS selectors for the three fragment sets
    #[serde(default)]
    pub selectors: SelectorConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            permalink_base: default_permalink_base(),
            timestamp_format: default_timestamp_format(),
            max_pages: None,
            selectors: SelectorConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

fn default_search_url() -> String {
    "https://twitter.com/i/search/timeline".to_string()
}

fn default_permalink_base() -> String {
    "https://www.twitter.com".to_string()
}

fn default_timestamp_format() -> String {
    "%I:%M %p - %d %b %Y".to_string()
}

impl ScraperConfig {
    /// Parse a YAML (or JSON, which is valid YAML) document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.search_url)
            .map_err(|e| Error::config(format!("search_url '{}': {e}", self.search_url)))?;

        if self.permalink_base.is_empty() {
            return Err(Error::config("permalink_base must not be empty"));
        }
        if self.max_pages == Some(0) {
            return Err(Error::config("max_pages must be at least 1"));
        }
        self.selectors.validate()
    }
}

/// Load a configuration file; `.json` files are parsed as JSON, anything
/// else as YAML.
pub fn load_config(path: impl AsRef<Path>) -> Result<ScraperConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        ScraperConfig::from_json_str(&content)
    } else {
        ScraperConfig::from_yaml_str(&content)
    }
}

// ============================================================================
// Selectors
// ============================================================================

/// CSS selectors for the fragments making up a page of tweets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Top-level tweet container carrying `data-permalink-path`
    #[serde(default = "default_tweet_selector")]
    pub tweet: String,

    /// Timestamp anchor carrying the `title` attribute
    #[serde(default = "default_timestamp_selector")]
    pub timestamp: String,

    /// Tweet text container
    #[serde(default = "default_content_selector")]
    pub content: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            tweet: default_tweet_selector(),
            timestamp: default_timestamp_selector(),
            content: default_content_selector(),
        }
    }
}

impl SelectorConfig {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("tweet", &self.tweet),
            ("timestamp", &self.timestamp),
            ("content", &self.content),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config(format!("selectors.{field} must not be empty")));
            }
        }
        Ok(())
    }
}

fn default_tweet_selector() -> String {
    ".tweet.js-stream-tweet.js-actionable-tweet.js-profile-popup-actionable.original-tweet.js-original-tweet"
        .to_string()
}

fn default_timestamp_selector() -> String {
    ".tweet-timestamp.js-permalink.js-nav.js-tooltip".to_string()
}

fn default_content_selector() -> String {
    ".js-tweet-text-container".to_string()
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            user_agent: None,
            headers: HashMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}
