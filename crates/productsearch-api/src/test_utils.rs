//! Unit test utilities
//!
//! Provides mock state for fast unit tests that don't require infrastructure.

use crate::AppState;
use productsearch_embeddings::test_mocks::MockEmbeddingService;
use productsearch_search::SearchService;
use std::sync::Arc;

/// Standard test result type for all test functions
pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Create `AppState` around a search service
pub fn app_state_with(search_service: Arc<dyn SearchService>) -> AppState {
    AppState::new(
        search_service,
        Arc::new(MockEmbeddingService::unavailable("not used")),
        "productsearch-test",
    )
}
