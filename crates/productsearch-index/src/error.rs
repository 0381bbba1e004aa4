//! Error types for document index operations

use thiserror::Error;

/// Result type alias for document index operations
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while executing a query against the document index
#[derive(Error, Debug)]
pub enum IndexError {
    /// Client could not be constructed from configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request never produced an HTTP response (connect, timeout, TLS)
    #[error("Document index unavailable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Index answered with a non-success status (bad query, missing index)
    #[error("Document index returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Query could not be serialized into a request body
    #[error("Failed to encode query: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Response body could not be decoded into a result envelope
    #[error("Failed to decode search response: {0}")]
    Decoding(String),
}

impl IndexError {
    /// True when the failure is a serialization defect rather than a
    /// transport or service problem
    pub const fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_) | Self::Decoding(_))
    }
}
