//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use studio_stream::prelude::*;
//! ```
//!
//! This will import:
//! - The orchestrator and its update types
//! - Model types (ChatMessage, Artifact, GenerationMode)
//! - Configuration and the error types
//! - Collaborator traits and the production adapters

pub use crate::orchestrator::{Orchestrator, TurnPhase, TurnUpdate};

pub use crate::models::{
    Artifact, ArtifactStatus, ChatMessage, GenerationMode, MessageRole, MessageStatus,
};

pub use crate::config::StreamConfig;
pub use crate::error::{StudioError, StudioResult};

pub use crate::adapters::{ErrorLog, ReqwestHttpClient, StaticSession};
pub use crate::traits::{ErrorSink, HttpClient, SessionProvider};
