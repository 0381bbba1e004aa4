use crate::AppState;
use crate::middleware::RequestContext;
use axum::{Extension, Json, Router, extract::State, routing::get};
use productsearch_common::CorrelationId;
use serde_json::json;
use tracing::{info, instrument};

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint with correlation ID tracking
///
/// Reports process liveness and embedding counters; upstream services are
/// not probed.
#[instrument(skip(state), fields(correlation_id))]
async fn health_check(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
) -> Json<serde_json::Value> {
    let correlation_id = context
        .as_ref()
        .map_or_else(CorrelationId::new, |ctx| ctx.correlation_id.clone());

    tracing::Span::current().record("correlation_id", correlation_id.to_string());

    info!(
        correlation_id = %correlation_id,
        "Health check request"
    );

    let embedding = state.embedding_service.get_stats().await;

    Json(json!({
        "status": "healthy",
        "service": state.service_name.as_ref(),
        "correlation_id": correlation_id.to_string(),
        "embedding": embedding
    }))
}
