//! Productsearch embedding generation crate
//!
//! Turns query text into dense vectors through a remote, OpenAI-compatible
//! embeddings API. Provider failures are folded into a two-outcome
//! [`QueryEmbedding`] so callers can degrade to keyword search without
//! handling transport errors themselves.

pub mod embedding;
pub mod error;

// Re-export main types
pub use embedding::{
    DefaultEmbeddingService, EmbeddingProvider, EmbeddingService, EmbeddingStats,
    OpenAiEmbeddingProvider, QueryEmbedding,
};
pub use error::{EmbeddingError, EmbeddingResult};
pub use productsearch_config::EmbeddingConfig;

// Re-export test utilities when test-utils feature is enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_mocks {
    pub use crate::embedding::test_utils::{MockEmbeddingProvider, MockEmbeddingService};
}
