//! Query construction for both retrieval modes
//!
//! Pure functions: the same inputs always produce the same query, and nothing
//! here can fail. Request validation happens before these are called.

use super::request::SortMode;
use productsearch_index::{ExactFilter, LexicalQuery, SortSpec, StructuredQuery, VectorQuery};

/// Dense vector field holding product embeddings
pub const VECTOR_FIELD: &str = "embedding";

/// Neighbors returned by a vector query
pub const NEAREST_NEIGHBORS: usize = 10;

/// Candidates considered before the top neighbors are picked
pub const CANDIDATE_POOL: usize = 100;

/// Keyword sub-field of `tags` used for exact tag matches
pub const TAG_FILTER_FIELD: &str = "tags.keyword";

/// Numeric field ordered on for popularity sort
pub const POPULARITY_FIELD: &str = "popularity";

/// Text fields a keyword query must match
pub const LEXICAL_FIELDS: [&str; 3] = ["name", "description", "tags"];

fn tag_filter(filter_tag: Option<&str>) -> Option<ExactFilter> {
    filter_tag
        .filter(|tag| !tag.is_empty())
        .map(|tag| ExactFilter::new(TAG_FILTER_FIELD, tag))
}

fn sort_spec(sort: SortMode) -> Option<SortSpec> {
    match sort {
        SortMode::Popularity => Some(SortSpec::descending(POPULARITY_FIELD)),
        SortMode::None => None,
    }
}

/// Build a nearest-neighbor query over the product embedding field
pub fn build_vector_query(
    vector: &[f32],
    filter_tag: Option<&str>,
    sort: SortMode,
) -> StructuredQuery {
    StructuredQuery::Vector(VectorQuery {
        field: VECTOR_FIELD.to_string(),
        vector: vector.to_vec(),
        k: NEAREST_NEIGHBORS,
        num_candidates: CANDIDATE_POOL,
        filter: tag_filter(filter_tag),
        sort: sort_spec(sort),
    })
}

/// Build a multi-field keyword query over name, description and tags
pub fn build_lexical_query(
    query_text: &str,
    filter_tag: Option<&str>,
    sort: SortMode,
) -> StructuredQuery {
    StructuredQuery::Lexical(LexicalQuery {
        text: query_text.to_string(),
        fields: LEXICAL_FIELDS.iter().map(ToString::to_string).collect(),
        filter: tag_filter(filter_tag),
        sort: sort_spec(sort),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use productsearch_index::SortDirection;
    use serde_json::json;

    #[test]
    fn test_vector_query_uses_fixed_neighbor_constants() {
        let query = build_vector_query(&[0.1, 0.2], None, SortMode::None);
        let StructuredQuery::Vector(vector) = &query else {
            unreachable!("vector builder produced {}", query.kind());
        };
        assert_eq!(vector.field, "embedding");
        assert_eq!(vector.k, 10);
        assert_eq!(vector.num_candidates, 100);
        assert_eq!(vector.vector, vec![0.1, 0.2]);
    }

    #[test]
    fn test_lexical_query_targets_name_description_tags() {
        let query = build_lexical_query("wireless mouse", None, SortMode::None);
        let StructuredQuery::Lexical(lexical) = &query else {
            unreachable!("lexical builder produced {}", query.kind());
        };
        assert_eq!(lexical.text, "wireless mouse");
        assert_eq!(lexical.fields, vec!["name", "description", "tags"]);
    }

    #[test]
    fn test_builders_are_deterministic() {
        assert_eq!(
            build_vector_query(&[0.3], Some("audio"), SortMode::Popularity),
            build_vector_query(&[0.3], Some("audio"), SortMode::Popularity)
        );
        assert_eq!(
            build_lexical_query("mouse", Some("audio"), SortMode::None),
            build_lexical_query("mouse", Some("audio"), SortMode::None)
        );
    }

    #[test]
    fn test_tag_produces_exactly_one_filter_in_both_shapes() {
        for query in [
            build_vector_query(&[0.1], Some("electronics"), SortMode::None),
            build_lexical_query("mouse", Some("electronics"), SortMode::None),
        ] {
            let filter = query.filter().unwrap();
            assert_eq!(filter.field, "tags.keyword");
            assert_eq!(filter.value, "electronics");
        }
    }

    #[test]
    fn test_missing_or_empty_tag_produces_no_filter() {
        for tag in [None, Some("")] {
            assert!(build_vector_query(&[0.1], tag, SortMode::None).filter().is_none());
            assert!(build_lexical_query("mouse", tag, SortMode::None).filter().is_none());
        }
    }

    #[test]
    fn test_popularity_sort_is_descending() {
        for query in [
            build_vector_query(&[0.1], None, SortMode::Popularity),
            build_lexical_query("mouse", None, SortMode::Popularity),
        ] {
            let sort = query.sort().unwrap();
            assert_eq!(sort.field, "popularity");
            assert_eq!(sort.direction, SortDirection::Desc);
        }
    }

    #[test]
    fn test_default_sort_keeps_relevance_order() {
        assert!(build_vector_query(&[0.1], None, SortMode::None).sort().is_none());
        assert!(build_lexical_query("mouse", None, SortMode::None).sort().is_none());
    }

    #[test]
    fn test_lexical_filter_clause_is_present_but_empty_without_tag() {
        let body =
            serde_json::to_value(build_lexical_query("mouse", None, SortMode::None)).unwrap();
        assert_eq!(body["query"]["bool"]["filter"], json!([]));
    }

    #[test]
    fn test_filtered_sorted_lexical_body() {
        let body = serde_json::to_value(build_lexical_query(
            "xyz123",
            Some("electronics"),
            SortMode::Popularity,
        ))
        .unwrap();

        assert_eq!(
            body,
            json!({
                "query": {
                    "bool": {
                        "must": {
                            "multi_match": {
                                "query": "xyz123",
                                "fields": ["name", "description", "tags"]
                            }
                        },
                        "filter": [{"term": {"tags.keyword": "electronics"}}]
                    }
                },
                "sort": [{"popularity": {"order": "desc"}}]
            })
        );
    }
}
