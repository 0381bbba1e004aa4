//! Search service abstraction

use super::request::SearchRequest;
use super::search::SearchOutcome;
use crate::SearchResult;
use async_trait::async_trait;
use productsearch_common::CorrelationId;

/// Trait for product search with correlation ID support
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Run a search, degrading to keyword retrieval when semantic retrieval is
    /// unavailable or finds nothing
    ///
    /// # Errors
    /// Returns an error when a document index call fails; such failures are
    /// never retried
    async fn search(
        &self,
        request: &SearchRequest,
        correlation_id: &CorrelationId,
    ) -> SearchResult<SearchOutcome>;
}
