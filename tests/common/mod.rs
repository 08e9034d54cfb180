//! Common test utilities for integration tests.
//!
//! Fixtures for building SSE bodies and orchestrators wired to either a
//! wiremock server or the scripted [`MockHttpClient`].
//!
//! # Example
//!
//! ```ignore
//! use common::{sse_body, TestOrchestrator};
//!
//! let body = sse_body(&[("message", r#"{"text":"hi"}"#), ("done", "{}")]);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;
use std::time::Duration;

use studio_stream::adapters::{ErrorLog, ReqwestHttpClient, StaticSession};
use studio_stream::config::StreamConfig;
use studio_stream::orchestrator::Orchestrator;
use studio_stream::traits::HttpClient;

pub const TEST_SESSION: &str = "test-session-123";
pub const TEST_MODEL: &str = "flux-pro";

/// One SSE frame.
pub fn sse_frame(event: &str, data: &str) -> String {
    format!("event: {}\ndata: {}\n\n", event, data)
}

/// A full SSE body from `(event, data)` pairs.
pub fn sse_body(frames: &[(&str, &str)]) -> String {
    frames
        .iter()
        .map(|(event, data)| sse_frame(event, data))
        .collect()
}

/// The image turn used across tests: thought, one image artifact moving to
/// completed, done.
pub fn image_turn_frames() -> Vec<(&'static str, &'static str)> {
    vec![
        ("thought", r#"{"desc":"Thinking..."}"#),
        ("artifact", r#"{"id":"a1","type":"image","status":"pending"}"#),
        (
            "artifact_status",
            r#"{"artifacts":[{"id":"a1","status":"processing"}],"all_done":false}"#,
        ),
        (
            "artifact_status",
            r#"{"artifacts":[{"id":"a1","status":"completed","url":"http://img.url"}],"all_done":true}"#,
        ),
        ("done", "{}"),
    ]
}

/// Orchestrator plus handles on its collaborators.
pub struct TestOrchestrator<C: HttpClient + 'static> {
    pub orchestrator: Orchestrator<C>,
    pub session: StaticSession,
    pub errors: ErrorLog,
}

/// Config pointing at `base_url` with fast retries.
pub fn test_config(base_url: &str) -> StreamConfig {
    StreamConfig::default()
        .with_base_url(base_url)
        .with_max_retries(2)
        .with_retry_base_delay(Duration::from_millis(10))
}

pub fn build_orchestrator<C: HttpClient + 'static>(
    config: &StreamConfig,
    http: C,
) -> TestOrchestrator<C> {
    let session = StaticSession::new(TEST_SESSION);
    let errors = ErrorLog::new(config.error_ttl);
    let orchestrator = Orchestrator::new(
        config,
        Arc::new(http),
        Arc::new(session.clone()),
        Arc::new(errors.clone()),
    );
    TestOrchestrator {
        orchestrator,
        session,
        errors,
    }
}

/// Orchestrator using the real reqwest client against `base_url`.
pub fn reqwest_orchestrator(base_url: &str) -> TestOrchestrator<ReqwestHttpClient> {
    build_orchestrator(&test_config(base_url), ReqwestHttpClient::new())
}
