//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming HTTP POST
//! - [`SessionProvider`] - current session id and activity bump
//! - [`ErrorSink`] - user-visible error reporting

pub mod http;
pub mod session;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient};
pub use session::SessionProvider;
pub use sink::ErrorSink;
