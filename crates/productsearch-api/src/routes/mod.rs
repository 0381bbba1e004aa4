pub mod health;
pub mod search;

use crate::AppState;
use axum::{Router, middleware};

/// Build the application router with correlation ID tracking on every route
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(search::routes())
        .layer(middleware::from_fn(
            crate::middleware::correlation_id_middleware,
        ))
        .with_state(state)
}
