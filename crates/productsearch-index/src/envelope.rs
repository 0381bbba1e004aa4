//! Result envelope returned by the document index

use crate::{IndexError, IndexResult};
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Decoded `_search` response
///
/// Keeps the full response body so it can be passed to callers unmodified,
/// alongside the two facts the search layer inspects: the number of hits
/// returned and the total-hit count.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEnvelope {
    raw: Value,
    hit_count: usize,
    total_hits: Option<u64>,
}

impl SearchEnvelope {
    /// Wrap a decoded response body
    ///
    /// # Errors
    /// Returns `IndexError::Decoding` if the body has no `hits.hits` array
    pub fn from_value(raw: Value) -> IndexResult<Self> {
        let hit_count = raw
            .pointer("/hits/hits")
            .and_then(Value::as_array)
            .map(Vec::len)
            .ok_or_else(|| {
                IndexError::Decoding("response has no hits.hits array".to_string())
            })?;

        // `hits.total` is `{"value": n, "relation": "eq"}` on 7.x+ and a bare
        // number on older clusters
        let total_hits = raw.pointer("/hits/total").and_then(|total| {
            total
                .as_u64()
                .or_else(|| total.get("value").and_then(Value::as_u64))
        });

        Ok(Self {
            raw,
            hit_count,
            total_hits,
        })
    }

    /// Decode a raw response body
    ///
    /// # Errors
    /// Returns `IndexError::Decoding` if the bytes are not JSON or lack `hits.hits`
    pub fn from_slice(bytes: &[u8]) -> IndexResult<Self> {
        let raw: Value =
            serde_json::from_slice(bytes).map_err(|e| IndexError::Decoding(e.to_string()))?;
        Self::from_value(raw)
    }

    /// Number of hits in this page of results
    pub const fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub const fn is_empty(&self) -> bool {
        self.hit_count == 0
    }

    /// Total matching documents reported by the index, when tracked
    pub const fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    pub const fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Serializes as the untouched response body
impl Serialize for SearchEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}
