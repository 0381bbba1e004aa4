//! Request middleware
//!
//! Assigns every request a correlation ID, taken from the incoming
//! `X-Correlation-ID` header when it holds a UUID, and echoes it back on the
//! response.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use productsearch_common::{CORRELATION_ID_HEADER, CorrelationId};

/// Per-request context made available to handlers as an extension
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub correlation_id: CorrelationId,
}

/// Attach a [`RequestContext`] to the request and the correlation ID header to
/// the response
pub async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(CorrelationId::new, CorrelationId::from);

    request.extensions_mut().insert(RequestContext {
        correlation_id: correlation_id.clone(),
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    response
}
