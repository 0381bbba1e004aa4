pub mod openai;
pub mod service;
pub mod traits;

pub use openai::OpenAiEmbeddingProvider;
pub use service::DefaultEmbeddingService;
pub use traits::{EmbeddingProvider, EmbeddingService, EmbeddingStats, QueryEmbedding};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
