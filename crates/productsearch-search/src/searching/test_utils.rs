//! Test utilities for search services

use super::request::SearchRequest;
use super::search::{FallbackReason, SearchMode, SearchOutcome, SearchPhase};
use super::service::SearchService;
use crate::{SearchError, SearchResult};

use async_trait::async_trait;
use productsearch_common::CorrelationId;
use productsearch_index::test_mocks::hits_response;
use productsearch_index::{IndexError, SearchEnvelope};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum MockBehavior {
    Results {
        body: serde_json::Value,
        served_by: SearchMode,
    },
    IndexFailure {
        status: u16,
        body: String,
    },
}

/// Mock search service for testing
///
/// Returns a fixed response and records each request it receives.
pub struct MockSearch {
    behavior: MockBehavior,
    requests: Mutex<Vec<(SearchRequest, CorrelationId)>>,
}

impl MockSearch {
    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Semantic results with `count` generated hits
    pub fn with_hits(count: usize) -> Self {
        Self::with_behavior(MockBehavior::Results {
            body: hits_response(count),
            served_by: SearchMode::Semantic,
        })
    }

    /// Return `body` verbatim as if produced by `served_by`
    pub fn with_body(body: serde_json::Value, served_by: SearchMode) -> Self {
        Self::with_behavior(MockBehavior::Results { body, served_by })
    }

    /// Create a mock that returns no results
    pub fn empty() -> Self {
        Self::with_body(hits_response(0), SearchMode::Keyword)
    }

    /// Fail every search as if the index returned `status`
    pub fn failing(status: u16, body: &str) -> Self {
        Self::with_behavior(MockBehavior::IndexFailure {
            status,
            body: body.to_string(),
        })
    }

    /// Requests received, in call order
    pub fn requests(&self) -> Vec<(SearchRequest, CorrelationId)> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchService for MockSearch {
    async fn search(
        &self,
        request: &SearchRequest,
        correlation_id: &CorrelationId,
    ) -> SearchResult<SearchOutcome> {
        tracing::Span::current().record("correlation_id", correlation_id.to_string());
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((request.clone(), correlation_id.clone()));
        }

        match &self.behavior {
            MockBehavior::Results { body, served_by } => {
                let results = SearchEnvelope::from_value(body.clone())
                    .map_err(|e| SearchError::from_index(SearchPhase::Primary, e))?;
                let fallback = match served_by {
                    SearchMode::Semantic => None,
                    SearchMode::Keyword => Some(FallbackReason::NoSemanticHits),
                };
                Ok(SearchOutcome {
                    results,
                    served_by: *served_by,
                    fallback,
                })
            }
            MockBehavior::IndexFailure { status, body } => Err(SearchError::from_index(
                SearchPhase::Primary,
                IndexError::Status {
                    status: *status,
                    body: body.clone(),
                },
            )),
        }
    }
}
