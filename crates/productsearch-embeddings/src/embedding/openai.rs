//! OpenAI-compatible embedding provider
//!
//! Calls `POST {base_url}/embeddings` with a single input string and returns the
//! first vector in the response. Any service exposing the same request and
//! response shape (Azure OpenAI gateways, local proxies) works unchanged.

use super::traits::EmbeddingProvider;
use crate::{EmbeddingError, EmbeddingResult};
use async_trait::async_trait;
use productsearch_config::EmbeddingConfig;
use serde::{Deserialize, Serialize};

/// Upper bound on how much of an error body is kept for logs
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Embedding provider backed by an OpenAI-compatible HTTP API
///
/// Holds one pooled `reqwest::Client` for the life of the process.
pub struct OpenAiEmbeddingProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbeddingProvider {
    /// Create a provider from configuration
    ///
    /// A missing API key is not an error here: the provider is still built and
    /// every `embed` call reports the key as missing.
    ///
    /// # Errors
    /// Returns `EmbeddingError::Network` if the HTTP client cannot be built
    pub fn new(config: &EmbeddingConfig) -> EmbeddingResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("productsearch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            dimensions: config.dimensions,
        })
    }

    /// Full URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingProvider {
    #[tracing::instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| EmbeddingError::config_error("embedding API key is not set"))?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&EmbeddingRequest {
                input: text,
                model: &self.model,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let bytes = response.bytes().await?;
        let parsed: EmbeddingResponse =
            serde_json::from_slice(&bytes).map_err(|e| EmbeddingError::Decode(e.to_string()))?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::empty_error("no embedding returned"))?
            .embedding;

        if embedding.is_empty() {
            return Err(EmbeddingError::empty_error("embedding vector is empty"));
        }
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }

        tracing::debug!(dimensions = embedding.len(), "Embedding generated");
        Ok(embedding)
    }

    fn embedding_dimension(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
