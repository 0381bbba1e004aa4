//! Productsearch search orchestration crate
//!
//! Decides between semantic and keyword retrieval for each request, builds the
//! matching document index query, and falls back to a keyword pass when the
//! semantic pass comes back empty.

pub mod error;
pub mod searching;

// Re-export main types
pub use error::{SearchError, SearchResult};
pub use searching::{
    query_builder::{build_lexical_query, build_vector_query},
    request::{SearchRequest, SortMode},
    search::{FallbackReason, Search, SearchMode, SearchOutcome, SearchPhase},
    service::SearchService,
};

// Re-export test utilities when test-utils feature is enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_mocks {
    pub use crate::searching::test_utils::MockSearch;
}
