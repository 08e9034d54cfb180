//! Session collaborator.
//!
//! Session CRUD lives outside this crate. The pipeline only needs to know
//! which session a turn belongs to and to bump that session's metadata
//! (last activity, ordering in the sidebar) the moment a turn is sent.

/// Supplies the current session and receives activity notifications.
pub trait SessionProvider: Send + Sync {
    /// Id of the session new turns are sent to, if one is selected.
    fn current_session_id(&self) -> Option<String>;

    /// Called synchronously at the start of every send.
    fn touch_session(&self, session_id: &str);
}
