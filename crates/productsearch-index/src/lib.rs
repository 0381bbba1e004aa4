//! Productsearch document index crate
//!
//! This crate owns the typed query model sent to the document index, its
//! Elasticsearch wire encoding, the result envelope handed back to callers,
//! and the HTTP client that executes queries. A mock index is available
//! behind the `test-utils` feature.

pub mod envelope;
pub mod error;
pub mod index;
pub mod query;

// Re-export main types
pub use envelope::SearchEnvelope;
pub use error::{IndexError, IndexResult};
pub use index::{DocumentIndex, ElasticsearchIndex};
pub use query::{
    ExactFilter, LexicalQuery, SortDirection, SortSpec, StructuredQuery, VectorQuery,
};
// Use unified configuration from productsearch-config
pub use productsearch_config::DocumentIndexConfig;

// Re-export test utilities when test-utils feature is enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_mocks {
    pub use crate::index::mock::{ExecutedQuery, MockDocumentIndex, hits_response};
}
