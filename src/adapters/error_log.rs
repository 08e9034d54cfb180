//! In-memory error sink with expiring entries.
//!
//! Mirrors how the studio shows transient error banners: each message is
//! visible for a fixed time after it was reported, then drops out.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;

use crate::traits::ErrorSink;

#[derive(Debug, Clone)]
struct Entry {
    message: String,
    reported_at: Instant,
}

/// Error sink that keeps messages for `ttl`.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    ttl: Duration,
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl ErrorLog {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Messages still within their display window, oldest first.
    ///
    /// Expired entries are pruned as a side effect.
    pub fn active(&self) -> Vec<String> {
        let now = Instant::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|entry| now.duration_since(entry.reported_at) < self.ttl);
        entries.iter().map(|entry| entry.message.clone()).collect()
    }

    /// Drop everything, expired or not.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl ErrorSink for ErrorLog {
    fn add_error(&self, message: &str) {
        tracing::debug!("error reported: {}", message);
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Entry {
                message: message.to_string(),
                reported_at: Instant::now(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let log = ErrorLog::new(Duration::from_secs(5));
        log.add_error("first");
        tokio::time::advance(Duration::from_secs(3)).await;
        log.add_error("second");

        assert_eq!(log.active(), vec!["first".to_string(), "second".to_string()]);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(log.active(), vec!["second".to_string()]);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(log.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear() {
        let log = ErrorLog::default();
        log.add_error("x");
        log.clear();
        assert!(log.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_entries() {
        let log = ErrorLog::default();
        let handle = log.clone();
        handle.add_error("shared");
        assert_eq!(log.active(), vec!["shared".to_string()]);
    }
}
