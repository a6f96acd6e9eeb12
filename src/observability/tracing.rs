//! Per-request spans.
//!
//! Each exchange gets a span carrying a UUID v4 request id so forwarded and
//! static requests can be correlated in the logs. The id is never written to
//! request or response headers.

use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;
use uuid::Uuid;

/// Builds the span for one HTTP exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}
