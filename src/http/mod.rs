//! HTTP client module
//!
//! Provides the HTTP client used to fetch search timeline pages.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Timeouts**: Per-client request timeout

mod client;

pub use client::{HttpClient, HttpClientConfig};
