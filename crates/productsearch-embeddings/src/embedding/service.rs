//! Concrete implementation of the EmbeddingService
//!
//! Wraps an [`EmbeddingProvider`] and converts its errors into the
//! two-outcome [`QueryEmbedding`] contract.

use super::openai::OpenAiEmbeddingProvider;
use super::traits::{EmbeddingProvider, EmbeddingService, EmbeddingStats, QueryEmbedding};
use crate::EmbeddingResult;
use async_trait::async_trait;
use productsearch_common::CorrelationId;
use productsearch_config::EmbeddingConfig;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Default implementation of EmbeddingService
///
/// Provider is Arc-shared so one HTTP client serves every request.
pub struct DefaultEmbeddingService {
    provider: Arc<dyn EmbeddingProvider>,
    stats: Arc<RwLock<EmbeddingStats>>,
}

impl DefaultEmbeddingService {
    /// Create a new embedding service backed by the OpenAI-compatible provider
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &EmbeddingConfig) -> EmbeddingResult<Self> {
        let provider = Arc::new(OpenAiEmbeddingProvider::new(config)?);
        Ok(Self::with_provider(provider))
    }

    /// Create with a custom provider
    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>) -> Self {
        let stats = Arc::new(RwLock::new(EmbeddingStats {
            model_name: provider.model_name().to_string(),
            embedding_dimension: provider.embedding_dimension(),
            ..Default::default()
        }));

        Self { provider, stats }
    }
}

#[async_trait]
impl EmbeddingService for DefaultEmbeddingService {
    #[tracing::instrument(skip(self, text), fields(correlation_id))]
    async fn embed_query(&self, text: &str, correlation_id: &CorrelationId) -> QueryEmbedding {
        tracing::Span::current().record("correlation_id", correlation_id.to_string());

        let outcome = match self.provider.embed(text).await {
            Ok(vector) if !vector.is_empty() => QueryEmbedding::Available(vector),
            Ok(_) => QueryEmbedding::Unavailable {
                reason: "provider returned an empty vector".to_string(),
            },
            Err(e) => QueryEmbedding::Unavailable {
                reason: e.to_string(),
            },
        };

        if let QueryEmbedding::Unavailable { reason } = &outcome {
            tracing::warn!(
                correlation_id = %correlation_id,
                reason = %reason,
                "Embedding unavailable, falling back to keyword search"
            );
        }

        let mut stats = self.stats.write().await;
        stats.total_requests = stats.total_requests.saturating_add(1);
        if outcome.is_available() {
            stats.available = stats.available.saturating_add(1);
        } else {
            stats.unavailable = stats.unavailable.saturating_add(1);
        }

        outcome
    }

    async fn get_stats(&self) -> EmbeddingStats {
        self.stats.read().await.clone()
    }
}
