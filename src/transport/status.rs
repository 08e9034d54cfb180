//! Observable connection state shared between the transport task and callers.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

/// Connected flag and retry counter of the most recent transport run.
///
/// Cloning shares the underlying counters.
#[derive(Debug, Clone, Default)]
pub struct TransportStatus {
    connected: Arc<AtomicBool>,
    retries: Arc<AtomicU32>,
}

impl TransportStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a response body is being read.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Retries performed by the current (or last) run.
    pub fn retry_count(&self) -> u32 {
        self.retries.load(Ordering::SeqCst)
    }

    pub(crate) fn reset_retries(&self) {
        self.retries.store(0, Ordering::SeqCst);
    }

    pub(crate) fn record_retry(&self) -> u32 {
        self.retries.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn connect(&self) -> ConnectionGuard<'_> {
        self.connected.store(true, Ordering::SeqCst);
        ConnectionGuard { status: self }
    }
}

/// Clears the connected flag when the attempt scope ends, whatever the exit path.
pub(crate) struct ConnectionGuard<'a> {
    status: &'a TransportStatus,
}

impl Drop for ConnectionGuard<'_> {
    fn drop(&mut self) {
        self.status.connected.store(false, Ordering::SeqCst);
    }
}
