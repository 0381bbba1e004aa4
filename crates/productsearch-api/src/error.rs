//! API error handling
//!
//! Errors are returned to clients as plaintext bodies with the correlation ID
//! in the `X-Correlation-ID` header, so the body carries only the message.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use productsearch_common::{CORRELATION_ID_HEADER, CorrelationId};
use productsearch_search::SearchError;
use thiserror::Error;
use tracing::{error, warn};

/// API error types with correlation IDs for request tracking
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `q` parameter was absent or empty
    #[error("Query parameter 'q' is required")]
    MissingQuery { correlation_id: CorrelationId },

    /// The search request failed validation
    #[error("Invalid search query: {reason}")]
    InvalidSearchQuery {
        reason: String,
        correlation_id: CorrelationId,
    },

    /// The search failed after validation; `message` is the underlying error
    #[error("{message}")]
    SearchFailed {
        message: String,
        correlation_id: CorrelationId,
    },
}

impl ApiError {
    /// Map a search layer error, keeping its message for the response body
    pub fn from_search_error(err: &SearchError, correlation_id: CorrelationId) -> Self {
        match err {
            SearchError::Validation { reason } => Self::InvalidSearchQuery {
                reason: reason.clone(),
                correlation_id,
            },
            SearchError::IndexExecution { .. } | SearchError::Encoding { .. } => {
                Self::SearchFailed {
                    message: err.to_string(),
                    correlation_id,
                }
            }
        }
    }

    /// Get the correlation ID from any error variant
    pub const fn correlation_id(&self) -> &CorrelationId {
        match self {
            Self::MissingQuery { correlation_id }
            | Self::InvalidSearchQuery { correlation_id, .. }
            | Self::SearchFailed { correlation_id, .. } => correlation_id,
        }
    }

    /// Get the HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingQuery { .. } | Self::InvalidSearchQuery { .. } => StatusCode::BAD_REQUEST,
            Self::SearchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let correlation_id = self.correlation_id().clone();

        if status.is_server_error() {
            error!(correlation_id = %correlation_id, error = %self, "Search request failed");
        } else {
            warn!(correlation_id = %correlation_id, error = %self, "Client error");
        }

        let mut response = (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response();

        if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
            response.headers_mut().insert(CORRELATION_ID_HEADER, value);
        }

        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::TestResult;
    use productsearch_index::IndexError;
    use productsearch_search::SearchPhase;

    #[tokio::test]
    async fn test_missing_query_is_plaintext_400() -> TestResult {
        let correlation_id = CorrelationId::new();
        let response = ApiError::MissingQuery {
            correlation_id: correlation_id.clone(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers()[CORRELATION_ID_HEADER],
            correlation_id.to_string().as_str()
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(&body[..], b"Query parameter 'q' is required");
        Ok(())
    }

    #[test]
    fn test_index_failure_maps_to_500_with_message() {
        let search_error = SearchError::from_index(
            SearchPhase::Fallback,
            IndexError::Status {
                status: 400,
                body: "parsing_exception".to_string(),
            },
        );

        let api_error = ApiError::from_search_error(&search_error, CorrelationId::new());

        assert_eq!(api_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.to_string(), search_error.to_string());
        assert!(api_error.to_string().contains("fallback"));
    }

    #[test]
    fn test_validation_failure_maps_to_400() {
        let api_error = ApiError::from_search_error(
            &SearchError::validation("query text is required"),
            CorrelationId::new(),
        );
        assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
    }
}
