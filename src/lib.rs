//! Studio Stream - streaming generation pipeline for a creative studio
//!
//! Opens a long-lived SSE request per turn, decodes the typed events and
//! folds them into an in-memory conversation with artifact tracking,
//! cancellation and retry.
//!
//! This library exposes modules for use in integration tests and the CLI.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod prelude;
pub mod sse;
pub mod state;
pub mod traits;
pub mod transport;
