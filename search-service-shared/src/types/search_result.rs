//! Per-collection search result shapes.
//!
//! This module defines the uniform result structure aggregated across
//! collections and the raw row shape returned by the store.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::fqid::Fqid;

/// A raw matching row: the document's fqid plus its JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedDocument {
    pub fqid: Fqid,
    pub data: Value,
}

/// Aggregated result for one collection.
///
/// `ids` is ordered and de-duplicated. `fields` maps every field that was
/// eligible for the match to `null`; it communicates which fields were
/// searched, not per-row relevance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub collection: String,
    pub ids: Vec<i64>,
    pub fields: Map<String, Value>,
}

impl SearchResult {
    /// Build a result for `collection`, de-duplicating `ids` while keeping
    /// their order, and mapping each searched field to `null`.
    pub fn new(collection: impl Into<String>, ids: Vec<i64>, searched_fields: &[String]) -> Self {
        let mut seen = HashSet::new();
        let ids = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        let fields = searched_fields
            .iter()
            .map(|field| (field.clone(), Value::Null))
            .collect();
        Self {
            collection: collection.into(),
            ids,
            fields,
        }
    }

    /// Result with no matches for `collection`.
    pub fn empty(collection: impl Into<String>, searched_fields: &[String]) -> Self {
        Self::new(collection, Vec::new(), searched_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn deduplicates_ids_preserving_order() {
        let result = SearchResult::new("topic", vec![3, 1, 3, 2, 1], &fields(&["title"]));
        assert_eq!(result.ids, vec![3, 1, 2]);
    }

    #[test]
    fn maps_searched_fields_to_null() {
        let result = SearchResult::new("topic", vec![1], &fields(&["text", "title"]));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "collection": "topic",
                "ids": [1],
                "fields": { "text": null, "title": null }
            })
        );
    }

    #[test]
    fn empty_result_has_no_ids() {
        let result = SearchResult::empty("motion_block", &fields(&["title", "internal"]));
        assert!(result.ids.is_empty());
        assert_eq!(result.fields.len(), 2);
    }
}
