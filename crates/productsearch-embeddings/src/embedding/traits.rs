//! Trait abstractions for embedding generation
//!
//! This module provides trait abstractions for embedding providers,
//! enabling pluggable implementations and better testability.

use crate::EmbeddingResult;
use async_trait::async_trait;
use productsearch_common::CorrelationId;
use serde::Serialize;

/// Trait for embedding generation providers
///
/// A provider performs the raw call and reports every failure as an error.
/// Deciding what a failure means for a search is left to [`EmbeddingService`].
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate one embedding for `text`
    ///
    /// # Errors
    /// Returns an error when the provider is unreachable, rejects the request,
    /// or answers without a vector of the expected dimensionality.
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Get the dimensionality of embeddings produced by this provider
    fn embedding_dimension(&self) -> usize;

    /// Get the name/description of the embedding model
    fn model_name(&self) -> &str;
}

/// Outcome of embedding a search query
///
/// Unavailability is an expected outcome, not an error: the caller switches to
/// keyword-only search.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEmbedding {
    /// A non-empty vector was produced
    Available(Vec<f32>),
    /// The provider failed or returned nothing usable
    Unavailable { reason: String },
}

impl QueryEmbedding {
    /// The vector, when one was produced
    pub fn vector(&self) -> Option<&[f32]> {
        match self {
            Self::Available(vector) => Some(vector),
            Self::Unavailable { .. } => None,
        }
    }

    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Service for embedding search queries
///
/// Shared across requests behind an `Arc`; implementations must be safe for
/// concurrent use without per-request locking.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embed a query, folding every provider failure into
    /// [`QueryEmbedding::Unavailable`]
    async fn embed_query(&self, text: &str, correlation_id: &CorrelationId) -> QueryEmbedding;

    /// Get service statistics
    async fn get_stats(&self) -> EmbeddingStats;
}

/// Statistics about embedding generation
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmbeddingStats {
    /// Total number of queries submitted
    pub total_requests: usize,

    /// Queries that produced a vector
    pub available: usize,

    /// Queries that fell back to keyword-only search
    pub unavailable: usize,

    /// Model name being used
    pub model_name: String,

    /// Model dimension
    pub embedding_dimension: usize,
}
