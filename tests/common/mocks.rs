//! Mock implementations for test fixtures.
//!
//! Re-exports the scripted client from `studio_stream::adapters::mock` and
//! adds wiremock helpers for the streaming endpoint.

pub use studio_stream::adapters::mock::{MockHttpClient, MockResponse};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const STREAM_PATH: &str = "/api/generate/stream";

/// A 200 response carrying `body` as an event stream.
pub fn sse_response(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/event-stream")
}

/// Mount `body` as the response to every POST on the stream path.
pub async fn mount_stream(server: &MockServer, body: impl Into<String>) {
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(sse_response(body))
        .mount(server)
        .await;
}

/// Mount a status-only failure for the next `times` requests.
pub async fn mount_failures(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("unavailable"))
        .up_to_n_times(times)
        .mount(server)
        .await;
}
