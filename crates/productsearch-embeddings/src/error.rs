//! Error types for the productsearch-embeddings crate

use thiserror::Error;

/// Result type alias for embedding operations
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Error type for embedding provider calls
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Provider is not usable with the current configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request never produced an HTTP response (connect, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Embedding provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("Malformed embedding response: {0}")]
    Decode(String),

    /// Provider answered successfully but without a usable vector
    #[error("Embedding generation failed: {0}")]
    Empty(String),

    /// Vector length does not match the configured dimensionality
    #[error("Embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl EmbeddingError {
    /// Create a configuration error
    pub fn config_error(msg: &str) -> Self {
        Self::Config(msg.to_string())
    }

    /// Create an empty-result error
    pub fn empty_error(msg: &str) -> Self {
        Self::Empty(msg.to_string())
    }
}
