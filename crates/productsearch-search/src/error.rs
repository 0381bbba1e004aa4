use crate::searching::search::SearchPhase;
use productsearch_index::IndexError;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Search-specific error types
///
/// Index failures carry the [`SearchPhase`] they happened in, so a failure on
/// the keyword fallback pass is distinguishable from one on the first pass.
/// Embedding failures never appear here: they switch the request to keyword
/// search instead.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid search request: {reason}")]
    Validation { reason: String },

    #[error("Document index query failed during {phase} search: {source}")]
    IndexExecution {
        phase: SearchPhase,
        #[source]
        source: IndexError,
    },

    #[error("Search encoding failed during {phase} search: {source}")]
    Encoding {
        phase: SearchPhase,
        #[source]
        source: IndexError,
    },
}

impl SearchError {
    /// Classify an index failure for the given phase
    pub fn from_index(phase: SearchPhase, source: IndexError) -> Self {
        if source.is_encoding() {
            Self::Encoding { phase, source }
        } else {
            Self::IndexExecution { phase, source }
        }
    }

    pub fn validation(reason: &str) -> Self {
        Self::Validation {
            reason: reason.to_string(),
        }
    }

    /// Phase the failure happened in; `None` for validation errors
    pub const fn phase(&self) -> Option<SearchPhase> {
        match self {
            Self::Validation { .. } => None,
            Self::IndexExecution { phase, .. } | Self::Encoding { phase, .. } => Some(*phase),
        }
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
