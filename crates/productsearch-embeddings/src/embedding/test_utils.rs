//! Test utilities for embedding services

use super::traits::{EmbeddingProvider, EmbeddingService, EmbeddingStats, QueryEmbedding};
use crate::{EmbeddingError, EmbeddingResult};
use async_trait::async_trait;
use productsearch_common::CorrelationId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock provider returning constant vectors
pub struct MockEmbeddingProvider {
    dimension: usize,
    fail: bool,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub const fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_failure(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Number of `embed` calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, _text: &str) -> EmbeddingResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EmbeddingError::Empty("Mock embedding failure".to_string()));
        }
        Ok(vec![0.1; self.dimension])
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &'static str {
        "mock-embedding-model"
    }
}

/// Mock embedding service with a scripted outcome
///
/// Records every query text it receives so tests can assert on call counts.
pub struct MockEmbeddingService {
    outcome: QueryEmbedding,
    queries: Mutex<Vec<String>>,
}

impl MockEmbeddingService {
    /// Always return `vector`
    pub fn available(vector: Vec<f32>) -> Self {
        Self {
            outcome: QueryEmbedding::Available(vector),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Always report the provider as unavailable
    pub fn unavailable(reason: &str) -> Self {
        Self {
            outcome: QueryEmbedding::Unavailable {
                reason: reason.to_string(),
            },
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Query texts received, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.queries().len()
    }
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed_query(&self, text: &str, correlation_id: &CorrelationId) -> QueryEmbedding {
        tracing::Span::current().record("correlation_id", correlation_id.to_string());
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(text.to_string());
        }
        self.outcome.clone()
    }

    async fn get_stats(&self) -> EmbeddingStats {
        let total_requests = self.call_count();
        let (available, unavailable) = if self.outcome.is_available() {
            (total_requests, 0)
        } else {
            (0, total_requests)
        };
        EmbeddingStats {
            total_requests,
            available,
            unavailable,
            model_name: "mock-embedding-model".to_string(),
            embedding_dimension: self.outcome.vector().map_or(0, <[f32]>::len),
        }
    }
}
