//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request tracing for the whole router.
///
/// Opens an `INFO` span per request (method, URI, version) and logs the status
/// and latency in milliseconds when the response is sent. 5xx answers are
/// additionally logged at `ERROR`.
///
/// ```text
/// INFO request{method=GET uri=/open?url=https%3A%2F%2FaB3_x-9Zq version=HTTP/1.1}: finished processing request latency=3 ms status=303
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
