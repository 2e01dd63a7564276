//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Request tracing for the status API.
///
/// Status polling is frequent, so request spans and responses log at
/// `DEBUG`; only server errors (5xx) are raised to `ERROR`.
///
/// ```text
/// DEBUG request{method=GET uri=/api/status version=HTTP/1.1}: finished processing request latency=3 ms status=200
/// ERROR request{method=GET uri=/health version=HTTP/1.1}: response failed classification=Status code: 503 Service Unavailable latency=1 ms
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::DEBUG)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
