//! Product search route
//!
//! `GET /search?q=<text>&tag=<tag>&sort=popularity`
//!
//! Successful responses carry the document index's JSON body exactly as
//! returned, plus an `X-Search-Mode` header naming the retrieval mode that
//! produced it (`semantic` or `keyword`). Failures are plaintext.

use crate::middleware::RequestContext;
use crate::{ApiError, ApiResult, AppState};
use axum::{
    Json, Router,
    extract::{Extension, Query, State},
    response::IntoResponse,
    routing::get,
};
use productsearch_common::CorrelationId;
use productsearch_search::{SearchRequest, SortMode};
use serde::Deserialize;
use std::time::Instant;
use tracing::{info, instrument};

/// Response header naming the retrieval mode that served the request
pub const SEARCH_MODE_HEADER: &str = "x-search-mode";

/// Query string parameters for `GET /search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Free-text query; required and non-empty
    pub q: Option<String>,
    /// Exact tag filter
    pub tag: Option<String>,
    /// `popularity` to order by popularity; anything else is ignored
    pub sort: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/search", get(search_handler))
}

/// Handle a product search
///
/// # Errors
///
/// - 400 when `q` is missing or empty
/// - 500 with the underlying error message when the search fails
#[instrument(skip(state, context, params), fields(correlation_id))]
pub async fn search_handler(
    State(state): State<AppState>,
    context: Option<Extension<RequestContext>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<impl IntoResponse> {
    let start = Instant::now();
    let correlation_id = context
        .as_ref()
        .map_or_else(CorrelationId::new, |ctx| ctx.correlation_id.clone());

    tracing::Span::current().record("correlation_id", correlation_id.to_string());

    let Some(query_text) = params.q.filter(|q| !q.is_empty()) else {
        return Err(ApiError::MissingQuery { correlation_id });
    };

    let sort = SortMode::from_param(params.sort.as_deref());
    let request = SearchRequest::new(query_text, params.tag, sort)
        .map_err(|e| ApiError::from_search_error(&e, correlation_id.clone()))?;

    info!(
        correlation_id = %correlation_id,
        query = %request.query_text(),
        tag = ?request.filter_tag(),
        sort = ?request.sort(),
        "Processing search request"
    );

    let outcome = state
        .search_service
        .search(&request, &correlation_id)
        .await
        .map_err(|e| ApiError::from_search_error(&e, correlation_id.clone()))?;

    info!(
        correlation_id = %correlation_id,
        mode = %outcome.served_by,
        hits = outcome.results.hit_count(),
        fallback = ?outcome.fallback,
        query_time_ms = start.elapsed().as_millis(),
        "Search completed"
    );

    Ok((
        [(SEARCH_MODE_HEADER, outcome.served_by.as_str())],
        Json(outcome.results),
    ))
}
