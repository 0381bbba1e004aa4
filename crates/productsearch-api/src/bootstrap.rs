//! Application bootstrap and service initialization
//!
//! Builds the embedding service, document index client and search
//! orchestrator from configuration and packages them into [`AppState`].

use anyhow::Context;
use productsearch_config::ApplicationConfig;
use productsearch_embeddings::{DefaultEmbeddingService, EmbeddingService};
use productsearch_index::{DocumentIndex, ElasticsearchIndex};
use productsearch_search::{Search, SearchService};
use std::sync::Arc;
use tracing::{info, warn};

use crate::AppState;

/// Initialize the query embedding service
///
/// # Errors
///
/// Returns error if the embedding HTTP client cannot be built
pub fn setup_embedding_service(
    config: &ApplicationConfig,
) -> anyhow::Result<Arc<dyn EmbeddingService>> {
    info!(
        model = %config.embedding.model,
        base_url = %config.embedding.base_url,
        "Initializing embedding service"
    );
    if config.embedding.api_key.is_none() {
        warn!("No embedding API key configured; searches will use keyword retrieval");
    }

    let service = DefaultEmbeddingService::new(&config.embedding)
        .context("Failed to initialize embedding service")?;
    Ok(Arc::new(service))
}

/// Initialize the document index client
///
/// # Errors
///
/// Returns error if the index HTTP client cannot be built
pub fn setup_document_index(config: &ApplicationConfig) -> anyhow::Result<Arc<dyn DocumentIndex>> {
    info!(
        url = %config.document_index.safe_connection_string(),
        index = %config.document_index.index_name,
        "Initializing document index client"
    );
    let index = ElasticsearchIndex::new(&config.document_index)
        .context("Failed to initialize document index client")?;
    Ok(Arc::new(index))
}

/// Initialize the search orchestrator over the configured index
pub fn setup_search_service(
    config: &ApplicationConfig,
    embedding_service: Arc<dyn EmbeddingService>,
    document_index: Arc<dyn DocumentIndex>,
) -> Arc<dyn SearchService> {
    Arc::new(Search::with_index_name(
        embedding_service,
        document_index,
        config.document_index.index_name.clone(),
    ))
}

/// Initialize all services and return the handler state
///
/// No network calls are made here; upstream availability is discovered per
/// request.
///
/// # Errors
///
/// Returns error if any client fails to initialize
pub fn initialize_app_state(config: &ApplicationConfig) -> anyhow::Result<AppState> {
    let embedding_service = setup_embedding_service(config)?;
    let document_index = setup_document_index(config)?;
    let search_service =
        setup_search_service(config, Arc::clone(&embedding_service), document_index);

    info!("Services initialized");

    Ok(AppState::new(
        search_service,
        embedding_service,
        &config.telemetry.service_name,
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[tokio::test]
    async fn test_app_state_reflects_config() {
        let mut config = ApplicationConfig::default();
        config.telemetry.service_name = "catalog-search".to_string();
        config.embedding.model = "text-embedding-3-small".to_string();

        let state = initialize_app_state(&config).unwrap();

        assert_eq!(state.service_name.as_ref(), "catalog-search");
        let stats = state.embedding_service.get_stats().await;
        assert_eq!(stats.model_name, "text-embedding-3-small");
        assert_eq!(stats.total_requests, 0);
    }
}
