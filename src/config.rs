//! Pipeline configuration.
//!
//! Use the builder methods to customize behaviour, or [`StreamConfig::from_env`]
//! to read overrides from `STUDIO_*` environment variables.
//!
//! # Example
//!
//! ```ignore
//! use studio_stream::config::StreamConfig;
//!
//! let config = StreamConfig::default()
//!     .with_base_url("https://studio.example.com")
//!     .with_max_retries(5);
//! ```

use std::str::FromStr;
use std::time::Duration;

use crate::transport::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_STREAM_PATH: &str = "/api/generate/stream";

/// Configuration for the transport and orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamConfig {
    /// Backend origin, without trailing slash
    pub base_url: String,
    /// Path of the streaming generation endpoint
    pub stream_path: String,
    /// Retries after the first failed attempt (default: 3)
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry (default: 1s)
    pub retry_base_delay: Duration,
    /// Capacity of the transport → orchestrator event channel (default: 64)
    pub channel_capacity: usize,
    /// How long reported errors stay visible (default: 5s)
    pub error_ttl: Duration,
    /// Bound on establishing the connection (default: 30s)
    pub connect_timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stream_path: DEFAULT_STREAM_PATH.to_string(),
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
            channel_capacity: 64,
            error_ttl: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl StreamConfig {
    /// Create a new StreamConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend origin.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the streaming endpoint path.
    pub fn with_stream_path(mut self, path: impl Into<String>) -> Self {
        self.stream_path = path.into();
        self
    }

    /// Set the retry budget.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base backoff delay.
    pub fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Set the event channel capacity (minimum 1).
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Set how long reported errors stay visible.
    pub fn with_error_ttl(mut self, ttl: Duration) -> Self {
        self.error_ttl = ttl;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Full URL of the streaming endpoint.
    pub fn stream_url(&self) -> String {
        if self.stream_path.starts_with('/') {
            format!("{}{}", self.base_url, self.stream_path)
        } else {
            format!("{}/{}", self.base_url, self.stream_path)
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_base_delay)
    }

    /// Create config from `STUDIO_*` environment variables.
    ///
    /// - `STUDIO_STREAM_URL` - backend origin
    /// - `STUDIO_STREAM_PATH` - endpoint path
    /// - `STUDIO_MAX_RETRIES` - retry budget
    /// - `STUDIO_RETRY_BASE_MS` - base backoff in milliseconds
    /// - `STUDIO_CHANNEL_CAPACITY` - event channel capacity
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("STUDIO_STREAM_URL") {
            config = config.with_base_url(url);
        }
        if let Some(path) = lookup("STUDIO_STREAM_PATH") {
            config = config.with_stream_path(path);
        }
        if let Some(retries) = parse_var::<u32>(&lookup, "STUDIO_MAX_RETRIES") {
            config = config.with_max_retries(retries);
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "STUDIO_RETRY_BASE_MS") {
            config = config.with_retry_base_delay(Duration::from_millis(ms));
        }
        if let Some(capacity) = parse_var::<usize>(&lookup, "STUDIO_CHANNEL_CAPACITY") {
            config = config.with_channel_capacity(capacity);
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}
