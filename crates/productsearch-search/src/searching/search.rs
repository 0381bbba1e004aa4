//! Search orchestrator
//!
//! Per request:
//!
//! 1. Embed the query text. If no vector is available, run a keyword query and
//!    return its result.
//! 2. Otherwise run a vector query. A failure is returned as-is. Hits are
//!    returned as-is.
//! 3. If the vector query found nothing, run one keyword query and return its
//!    result, even when that is empty too.
//!
//! At most two index calls happen per request and they are strictly
//! sequential. Results are never merged, re-ranked or retried.

use super::query_builder::{build_lexical_query, build_vector_query};
use super::request::SearchRequest;
use super::service::SearchService;
use crate::{SearchError, SearchResult};
use async_trait::async_trait;
use productsearch_common::CorrelationId;
use productsearch_embeddings::{EmbeddingService, QueryEmbedding};
use productsearch_index::{DocumentIndex, SearchEnvelope, StructuredQuery};
use std::fmt;
use std::sync::Arc;

/// Default index queried when none is configured
pub const DEFAULT_INDEX_NAME: &str = "products";

/// Retrieval mode that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Semantic,
    Keyword,
}

impl SearchMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Keyword => "keyword",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which index call of a request an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// First index call (vector, or keyword when no embedding was available)
    Primary,
    /// Keyword call made after an empty vector result
    Fallback,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        })
    }
}

/// Why a request was served by keyword search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The embedding provider failed or returned nothing
    EmbeddingUnavailable { reason: String },
    /// The vector query succeeded with zero hits
    NoSemanticHits,
}

/// Final result of a search request
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Index response, unmodified
    pub results: SearchEnvelope,
    /// Mode of the query that produced `results`
    pub served_by: SearchMode,
    /// Set when keyword search served the request
    pub fallback: Option<FallbackReason>,
}

/// Search service that orchestrates embedding, vector search and keyword
/// fallback against a single index
pub struct Search {
    embedding_service: Arc<dyn EmbeddingService>,
    document_index: Arc<dyn DocumentIndex>,
    index_name: String,
}

impl Search {
    /// Create a search service over the default `products` index
    pub fn new(
        embedding_service: Arc<dyn EmbeddingService>,
        document_index: Arc<dyn DocumentIndex>,
    ) -> Self {
        Self::with_index_name(embedding_service, document_index, DEFAULT_INDEX_NAME)
    }

    /// Create a search service over a named index
    pub fn with_index_name(
        embedding_service: Arc<dyn EmbeddingService>,
        document_index: Arc<dyn DocumentIndex>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            embedding_service,
            document_index,
            index_name: index_name.into(),
        }
    }

    async fn run(
        &self,
        query: &StructuredQuery,
        phase: SearchPhase,
        correlation_id: &CorrelationId,
    ) -> SearchResult<SearchEnvelope> {
        tracing::debug!(
            correlation_id = %correlation_id,
            phase = %phase,
            query_kind = query.kind(),
            index = %self.index_name,
            "Executing index query"
        );

        self.document_index
            .execute(query, &self.index_name, correlation_id)
            .await
            .map_err(|e| {
                let error = SearchError::from_index(phase, e);
                tracing::error!(correlation_id = %correlation_id, "{error}");
                error
            })
    }

    async fn keyword_search(
        &self,
        request: &SearchRequest,
        phase: SearchPhase,
        reason: FallbackReason,
        correlation_id: &CorrelationId,
    ) -> SearchResult<SearchOutcome> {
        let query =
            build_lexical_query(request.query_text(), request.filter_tag(), request.sort());
        let results = self.run(&query, phase, correlation_id).await?;

        Ok(SearchOutcome {
            results,
            served_by: SearchMode::Keyword,
            fallback: Some(reason),
        })
    }
}

#[async_trait]
impl SearchService for Search {
    #[tracing::instrument(
        skip(self, request, correlation_id),
        fields(correlation_id, mode, hit_count)
    )]
    async fn search(
        &self,
        request: &SearchRequest,
        correlation_id: &CorrelationId,
    ) -> SearchResult<SearchOutcome> {
        let span = tracing::Span::current();
        span.record("correlation_id", correlation_id.to_string());

        let embedding = self
            .embedding_service
            .embed_query(request.query_text(), correlation_id)
            .await;

        let outcome = match embedding {
            QueryEmbedding::Unavailable { reason } => {
                tracing::info!(
                    correlation_id = %correlation_id,
                    "No query embedding, using keyword search only"
                );
                self.keyword_search(
                    request,
                    SearchPhase::Primary,
                    FallbackReason::EmbeddingUnavailable { reason },
                    correlation_id,
                )
                .await?
            }
            QueryEmbedding::Available(vector) if vector.is_empty() => {
                self.keyword_search(
                    request,
                    SearchPhase::Primary,
                    FallbackReason::EmbeddingUnavailable {
                        reason: "empty embedding vector".to_string(),
                    },
                    correlation_id,
                )
                .await?
            }
            QueryEmbedding::Available(vector) => {
                let query = build_vector_query(&vector, request.filter_tag(), request.sort());
                let results = self
                    .run(&query, SearchPhase::Primary, correlation_id)
                    .await?;

                if results.is_empty() {
                    tracing::info!(
                        correlation_id = %correlation_id,
                        "Semantic search returned no hits, falling back to keyword search"
                    );
                    self.keyword_search(
                        request,
                        SearchPhase::Fallback,
                        FallbackReason::NoSemanticHits,
                        correlation_id,
                    )
                    .await?
                } else {
                    SearchOutcome {
                        results,
                        served_by: SearchMode::Semantic,
                        fallback: None,
                    }
                }
            }
        };

        span.record("mode", outcome.served_by.as_str());
        span.record("hit_count", outcome.results.hit_count());
        tracing::info!(
            correlation_id = %correlation_id,
            mode = %outcome.served_by,
            hit_count = outcome.results.hit_count(),
            "Search completed"
        );

        Ok(outcome)
    }
}
