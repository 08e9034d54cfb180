//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`ErrorLog`] - error sink with expiring entries
//! - [`StaticSession`] - fixed session provider
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides a scripted [`mock::MockHttpClient`].

pub mod error_log;
pub mod mock;
pub mod reqwest_http;
pub mod session;

pub use error_log::ErrorLog;
pub use mock::{MockHttpClient, MockResponse};
pub use reqwest_http::ReqwestHttpClient;
pub use session::StaticSession;
