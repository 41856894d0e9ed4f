//! Inbound search request body.

use serde::{Deserialize, Serialize};

/// A search request: free text plus an optional restriction to a subset of
/// the registered collections. When `collections` is absent, every
/// registered collection is searched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_without_collections() {
        let request: SearchRequest = serde_json::from_str(r#"{"query":"agenda"}"#).unwrap();
        assert_eq!(request.query, "agenda");
        assert!(request.collections.is_none());
    }

    #[test]
    fn deserializes_with_collections() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"query":"agenda","collections":["topic"]}"#).unwrap();
        assert_eq!(request.collections, Some(vec!["topic".to_string()]));
    }
}
