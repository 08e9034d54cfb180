//! Client-side state owned by the orchestrator.
//!
//! - [`Conversation`] - ordered message log
//! - [`GenerationStore`] - per-session generation flag and progress

pub mod conversation;
pub mod generation;

pub use conversation::Conversation;
pub use generation::{GenerationState, GenerationStore};
