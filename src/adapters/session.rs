//! Fixed-session provider.
//!
//! Used by the CLI and by tests, where the session is chosen up front and
//! the metadata bump only needs to be observable.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::traits::SessionProvider;

/// Session provider with a settable current session and a touch counter.
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    current: Arc<RwLock<Option<String>>>,
    touches: Arc<AtomicUsize>,
}

impl StaticSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Some(session_id.into()))),
            touches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Provider with no session selected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn select(&self, session_id: Option<String>) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = session_id;
    }

    /// How many times `touch_session` has been called.
    pub fn touch_count(&self) -> usize {
        self.touches.load(Ordering::SeqCst)
    }
}

impl SessionProvider for StaticSession {
    fn current_session_id(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn touch_session(&self, session_id: &str) {
        tracing::debug!("session {} touched", session_id);
        self.touches.fetch_add(1, Ordering::SeqCst);
    }
}
