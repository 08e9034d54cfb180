//! Streaming transport for the generation endpoint.
//!
//! - [`TransportClient`] - POST, SSE framing, reconnection with backoff
//! - [`RetryPolicy`] - backoff schedule
//! - [`TransportStatus`] - connected flag and retry counter

mod client;
mod retry;
mod status;

pub use client::{TransportClient, TransportEvent};
pub use retry::RetryPolicy;
pub use status::TransportStatus;
