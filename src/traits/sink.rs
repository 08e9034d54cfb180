//! Error reporting collaborator.

/// Destination for user-visible error messages (toasts, banners, logs).
pub trait ErrorSink: Send + Sync {
    fn add_error(&self, message: &str);
}
