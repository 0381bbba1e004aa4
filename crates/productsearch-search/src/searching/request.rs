//! Validated search request

use crate::{SearchError, SearchResult};

/// Result ordering requested by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Index relevance order
    #[default]
    None,
    /// Most popular first
    Popularity,
}

impl SortMode {
    /// Parse the `sort` request parameter
    ///
    /// Only the exact value `popularity` selects popularity ordering; anything
    /// else, including an absent parameter, keeps relevance order.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("popularity") => Self::Popularity,
            _ => Self::None,
        }
    }
}

/// A search request that has passed validation
///
/// Fields are private so a request with empty query text cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query_text: String,
    filter_tag: Option<String>,
    sort: SortMode,
}

impl SearchRequest {
    /// Validate and build a request
    ///
    /// An empty `filter_tag` is treated the same as no filter.
    ///
    /// # Errors
    /// Returns `SearchError::Validation` if the query text is empty
    pub fn new(
        query_text: impl Into<String>,
        filter_tag: Option<String>,
        sort: SortMode,
    ) -> SearchResult<Self> {
        let query_text = query_text.into();
        if query_text.is_empty() {
            return Err(SearchError::validation("query text is required"));
        }

        Ok(Self {
            query_text,
            filter_tag: filter_tag.filter(|tag| !tag.is_empty()),
            sort,
        })
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn filter_tag(&self) -> Option<&str> {
        self.filter_tag.as_deref()
    }

    pub const fn sort(&self) -> SortMode {
        self.sort
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_empty_query_is_rejected() {
        let err = SearchRequest::new("", None, SortMode::None).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_whitespace_query_is_accepted() {
        let request = SearchRequest::new("  ", None, SortMode::None).unwrap();
        assert_eq!(request.query_text(), "  ");
    }

    #[test]
    fn test_empty_tag_means_no_filter() {
        let request = SearchRequest::new("mouse", Some(String::new()), SortMode::None).unwrap();
        assert_eq!(request.filter_tag(), None);
    }

    #[test]
    fn test_query_text_is_kept_verbatim() {
        let request = SearchRequest::new(" wireless mouse ", None, SortMode::None).unwrap();
        assert_eq!(request.query_text(), " wireless mouse ");
    }

    #[test]
    fn test_sort_param_parsing() {
        assert_eq!(SortMode::from_param(Some("popularity")), SortMode::Popularity);
        assert_eq!(SortMode::from_param(Some("Popularity")), SortMode::None);
        assert_eq!(SortMode::from_param(Some("price")), SortMode::None);
        assert_eq!(SortMode::from_param(Some("")), SortMode::None);
        assert_eq!(SortMode::from_param(None), SortMode::None);
    }
}
