//! Mock implementation of DocumentIndex for testing
//!
//! Replays scripted responses in order and records every query it executes,
//! so tests can assert on how many index calls were made and what shape each
//! one had.

use crate::{DocumentIndex, IndexError, IndexResult, SearchEnvelope, StructuredQuery};
use async_trait::async_trait;
use productsearch_common::CorrelationId;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A query the mock received
#[derive(Debug, Clone)]
pub struct ExecutedQuery {
    pub query: StructuredQuery,
    pub index_name: String,
    pub correlation_id: CorrelationId,
}

#[derive(Debug, Clone)]
enum ScriptedResponse {
    Body(Value),
    Status { status: u16, body: String },
    Decoding(String),
}

/// Elasticsearch-shaped response body with `count` generated hits
pub fn hits_response(count: usize) -> Value {
    let hits: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "_index": "products",
                "_id": format!("product-{i}"),
                "_score": 1.0,
                "_source": {"name": format!("Product {i}"), "popularity": i}
            })
        })
        .collect();

    json!({
        "took": 1,
        "timed_out": false,
        "hits": {
            "total": {"value": count, "relation": "eq"},
            "hits": hits
        }
    })
}

/// Mock document index for testing
///
/// Unscripted calls return an empty result set.
#[derive(Clone, Default)]
pub struct MockDocumentIndex {
    responses: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    executed: Arc<Mutex<Vec<ExecutedQuery>>>,
}

impl MockDocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with `count` hits
    #[must_use]
    pub fn then_hits(self, count: usize) -> Self {
        self.then_body(hits_response(count))
    }

    /// Queue a raw response body
    #[must_use]
    pub fn then_body(self, body: Value) -> Self {
        self.push(ScriptedResponse::Body(body))
    }

    /// Queue a non-success status response
    #[must_use]
    pub fn then_status(self, status: u16, body: &str) -> Self {
        self.push(ScriptedResponse::Status {
            status,
            body: body.to_string(),
        })
    }

    /// Queue an undecodable response
    #[must_use]
    pub fn then_decoding_failure(self, message: &str) -> Self {
        self.push(ScriptedResponse::Decoding(message.to_string()))
    }

    fn push(self, response: ScriptedResponse) -> Self {
        if let Ok(mut responses) = self.responses.lock() {
            responses.push_back(response);
        }
        self
    }

    /// Queries executed so far, in call order
    pub fn executed(&self) -> Vec<ExecutedQuery> {
        self.executed
            .lock()
            .map(|executed| executed.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.executed().len()
    }

    /// Query shapes executed so far, e.g. `["vector", "lexical"]`
    pub fn executed_kinds(&self) -> Vec<&'static str> {
        self.executed().iter().map(|e| e.query.kind()).collect()
    }
}

#[async_trait]
impl DocumentIndex for MockDocumentIndex {
    async fn execute(
        &self,
        query: &StructuredQuery,
        index_name: &str,
        correlation_id: &CorrelationId,
    ) -> IndexResult<SearchEnvelope> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(ExecutedQuery {
                query: query.clone(),
                index_name: index_name.to_string(),
                correlation_id: correlation_id.clone(),
            });
        }

        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut responses| responses.pop_front());

        match next {
            None => SearchEnvelope::from_value(hits_response(0)),
            Some(ScriptedResponse::Body(body)) => SearchEnvelope::from_value(body),
            Some(ScriptedResponse::Status { status, body }) => {
                Err(IndexError::Status { status, body })
            }
            Some(ScriptedResponse::Decoding(message)) => Err(IndexError::Decoding(message)),
        }
    }
}
