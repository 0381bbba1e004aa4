//! Productsearch HTTP API
//!
//! Exposes `GET /search` and `GET /health` over the search orchestrator. The
//! binary in `main.rs` wires configuration, logging and collaborators together
//! through [`bootstrap`].

pub mod bootstrap;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

pub use error::{ApiError, ApiResult};
pub use middleware::{RequestContext, correlation_id_middleware};
pub use state::AppState;
