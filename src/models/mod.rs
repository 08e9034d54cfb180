//! Conversation and request data model.

mod artifact;
mod message;
mod request;

pub use artifact::{Artifact, ArtifactStatus, MediaKind};
pub use message::{ChatMessage, MessageRole, MessageStatus};
pub use request::{GenerationMode, StreamRequest};
