//! Per-session generation flag and progress.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Whether a session is generating, and how far along it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationState {
    pub is_generating: bool,
    /// Percentage (0-100) of the turn's artifacts that reached a terminal status
    pub progress: u8,
}

impl GenerationState {
    pub fn begin(&mut self) {
        self.is_generating = true;
        self.progress = 0;
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// Back to idle; used on done, error and cancel alike.
    pub fn finish(&mut self) {
        self.is_generating = false;
        self.progress = 0;
    }
}

/// Generation state keyed by session id.
///
/// Entries are created on first send and live until the session is discarded.
#[derive(Debug, Default)]
pub struct GenerationStore {
    sessions: HashMap<String, GenerationState>,
}

impl GenerationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// State for `session_id`, or the idle default if the session never sent.
    pub fn get(&self, session_id: &str) -> GenerationState {
        self.sessions.get(session_id).copied().unwrap_or_default()
    }

    pub fn entry(&mut self, session_id: &str) -> &mut GenerationState {
        self.sessions.entry(session_id.to_string()).or_default()
    }

    pub fn update<F>(&mut self, session_id: &str, f: F)
    where
        F: FnOnce(&mut GenerationState),
    {
        f(self.entry(session_id));
    }

    pub fn remove(&mut self, session_id: &str) -> Option<GenerationState> {
        self.sessions.remove(session_id)
    }
}
