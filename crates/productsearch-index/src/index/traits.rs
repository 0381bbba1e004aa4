//! Document index abstraction
//!
//! Lets the search layer run against Elasticsearch in production and an
//! in-memory mock in tests.

use crate::{IndexResult, SearchEnvelope, StructuredQuery};
use async_trait::async_trait;
use productsearch_common::CorrelationId;

/// Trait for document index backends
///
/// Implementations hold one long-lived client and must be safe to share across
/// concurrently executing requests.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Execute `query` against `index_name`
    ///
    /// Hits are returned in the index's ranking order. A query that matches
    /// nothing is a successful, empty envelope, not an error.
    ///
    /// # Errors
    /// Returns an error if the query cannot be encoded, the index cannot be
    /// reached or rejects the query, or the response cannot be decoded
    async fn execute(
        &self,
        query: &StructuredQuery,
        index_name: &str,
        correlation_id: &CorrelationId,
    ) -> IndexResult<SearchEnvelope>;
}
