//! Application state for Axum handlers
//!
//! Holds the services initialized once at startup and shared by every
//! handler.

use productsearch_embeddings::EmbeddingService;
use productsearch_search::SearchService;
use std::sync::Arc;

/// Application state containing all shared services
///
/// Cloning is cheap: the services and their HTTP clients sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Search orchestrator
    pub search_service: Arc<dyn SearchService>,
    /// Embedding service shared with the orchestrator, read for health stats
    pub embedding_service: Arc<dyn EmbeddingService>,
    /// Name reported by the health endpoint
    pub service_name: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(
        search_service: Arc<dyn SearchService>,
        embedding_service: Arc<dyn EmbeddingService>,
        service_name: &str,
    ) -> Self {
        Self {
            search_service,
            embedding_service,
            service_name: Arc::from(service_name),
        }
    }
}
