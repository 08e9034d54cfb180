//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with a scripted response queue

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
