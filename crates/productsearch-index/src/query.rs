//! Typed query model and its Elasticsearch wire encoding
//!
//! A [`StructuredQuery`] is either a nearest-neighbor [`VectorQuery`] or a
//! multi-field [`LexicalQuery`]. Each carries at most one [`ExactFilter`] and at
//! most one [`SortSpec`]; there is no way to build a query with an untyped or
//! partially-populated body.
//!
//! Serialization produces the request body for `POST /{index}/_search`:
//!
//! ```json
//! {"knn": {"field": "embedding", "query_vector": [..], "k": 10, "num_candidates": 100},
//!  "query": {"bool": {"filter": [{"term": {"tags.keyword": "electronics"}}]}},
//!  "sort": [{"popularity": {"order": "desc"}}]}
//! ```
//!
//! The vector body only carries `query` when a filter is present. The lexical
//! body always carries a `filter` array, empty when there is no filter, so its
//! shape is the same with or without one.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// Query executed against the document index
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredQuery {
    /// Approximate nearest-neighbor search over a dense vector field
    Vector(VectorQuery),
    /// Full-text match over several text fields
    Lexical(LexicalQuery),
}

/// Nearest-neighbor query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct VectorQuery {
    /// Dense vector field searched
    pub field: String,
    /// Query embedding
    pub vector: Vec<f32>,
    /// Number of neighbors returned
    pub k: usize,
    /// Candidates considered per shard before picking the top `k`
    pub num_candidates: usize,
    pub filter: Option<ExactFilter>,
    pub sort: Option<SortSpec>,
}

/// Multi-field full-text query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalQuery {
    /// Text that must match
    pub text: String,
    /// Fields the text is matched against
    pub fields: Vec<String>,
    pub filter: Option<ExactFilter>,
    pub sort: Option<SortSpec>,
}

/// Exact-value term filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactFilter {
    pub field: String,
    pub value: String,
}

/// Explicit result ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl ExactFilter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl SortSpec {
    /// Descending order on `field`
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

impl StructuredQuery {
    /// Short name of the query shape, for logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Vector(_) => "vector",
            Self::Lexical(_) => "lexical",
        }
    }

    pub const fn filter(&self) -> Option<&ExactFilter> {
        match self {
            Self::Vector(query) => query.filter.as_ref(),
            Self::Lexical(query) => query.filter.as_ref(),
        }
    }

    pub const fn sort(&self) -> Option<&SortSpec> {
        match self {
            Self::Vector(query) => query.sort.as_ref(),
            Self::Lexical(query) => query.sort.as_ref(),
        }
    }

    /// Encode as a JSON request body
    ///
    /// # Errors
    /// Returns the serializer error if the query cannot be encoded
    pub fn to_body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

// -----------------------------------------------------------------------------
// Wire encoding
// -----------------------------------------------------------------------------

/// Serializes as a JSON object with a single, dynamically named key
struct SingleEntry<'a, V>(&'a str, V);

impl<V: Serialize> Serialize for SingleEntry<'_, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0, &self.1)?;
        map.end()
    }
}

#[derive(Serialize)]
struct TermClause<'a> {
    term: SingleEntry<'a, &'a str>,
}

#[derive(Serialize)]
struct SortOrder {
    order: SortDirection,
}

type SortClause<'a> = SingleEntry<'a, SortOrder>;

fn term_clauses(filter: Option<&ExactFilter>) -> Vec<TermClause<'_>> {
    filter
        .map(|filter| TermClause {
            term: SingleEntry(filter.field.as_str(), filter.value.as_str()),
        })
        .into_iter()
        .collect()
}

fn sort_clauses(sort: Option<&SortSpec>) -> Option<[SortClause<'_>; 1]> {
    sort.map(|sort| {
        [SingleEntry(
            sort.field.as_str(),
            SortOrder {
                order: sort.direction,
            },
        )]
    })
}

#[derive(Serialize)]
struct KnnClause<'a> {
    field: &'a str,
    query_vector: &'a [f32],
    k: usize,
    num_candidates: usize,
}

#[derive(Serialize)]
struct FilterOnlyBool<'a> {
    filter: Vec<TermClause<'a>>,
}

#[derive(Serialize)]
struct FilterOnlyQuery<'a> {
    #[serde(rename = "bool")]
    bool_query: FilterOnlyBool<'a>,
}

#[derive(Serialize)]
struct VectorBody<'a> {
    knn: KnnClause<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<FilterOnlyQuery<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<[SortClause<'a>; 1]>,
}

#[derive(Serialize)]
struct MultiMatch<'a> {
    query: &'a str,
    fields: &'a [String],
}

#[derive(Serialize)]
struct MustClause<'a> {
    multi_match: MultiMatch<'a>,
}

#[derive(Serialize)]
struct LexicalBool<'a> {
    must: MustClause<'a>,
    filter: Vec<TermClause<'a>>,
}

#[derive(Serialize)]
struct LexicalQueryClause<'a> {
    #[serde(rename = "bool")]
    bool_query: LexicalBool<'a>,
}

#[derive(Serialize)]
struct LexicalBody<'a> {
    query: LexicalQueryClause<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort: Option<[SortClause<'a>; 1]>,
}

impl Serialize for VectorQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let query = self.filter.as_ref().map(|filter| FilterOnlyQuery {
            bool_query: FilterOnlyBool {
                filter: term_clauses(Some(filter)),
            },
        });

        VectorBody {
            knn: KnnClause {
                field: &self.field,
                query_vector: &self.vector,
                k: self.k,
                num_candidates: self.num_candidates,
            },
            query,
            sort: sort_clauses(self.sort.as_ref()),
        }
        .serialize(serializer)
    }
}

impl Serialize for LexicalQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        LexicalBody {
            query: LexicalQueryClause {
                bool_query: LexicalBool {
                    must: MustClause {
                        multi_match: MultiMatch {
                            query: &self.text,
                            fields: &self.fields,
                        },
                    },
                    filter: term_clauses(self.filter.as_ref()),
                },
            },
            sort: sort_clauses(self.sort.as_ref()),
        }
        .serialize(serializer)
    }
}

impl Serialize for StructuredQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Vector(query) => query.serialize(serializer),
            Self::Lexical(query) => query.serialize(serializer),
        }
    }
}
