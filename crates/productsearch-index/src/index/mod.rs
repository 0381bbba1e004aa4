pub mod elasticsearch;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use self::elasticsearch::ElasticsearchIndex;
pub use self::traits::DocumentIndex;
