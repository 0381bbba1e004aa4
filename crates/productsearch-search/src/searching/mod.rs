//! Search service module for querying the product index
pub mod query_builder;
pub mod request;
pub mod search;
pub mod service;

pub use request::{SearchRequest, SortMode};
pub use search::{SearchMode, SearchOutcome};
pub use service::SearchService;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
