//! Declarative registration of searchable collections.
//!
//! The registry is the central, read-only catalogue of which collections are
//! searchable and on which document fields. It is assembled once at startup
//! and passed by reference; iteration order defines the order of aggregated
//! search results.

use thiserror::Error;

/// Longest identifier accepted for collections and field names. Matches the
/// PostgreSQL identifier length limit.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Errors raised while building the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A collection with this name is already registered.
    #[error("collection '{0}' is already registered")]
    DuplicateCollection(String),

    /// A spec was declared without any searchable fields.
    #[error("collection '{0}' has no searchable fields")]
    NoSearchableFields(String),

    /// A collection or field name is not a safe SQL identifier.
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),
}

/// Returns true for lowercase SQL-safe identifiers: `[a-z_][a-z0-9_]*`, at
/// most 63 bytes. Collection and field names reach generated DDL as
/// identifiers, so nothing outside this grammar is ever accepted.
pub fn is_valid_identifier(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_IDENTIFIER_LEN {
        return false;
    }
    let bytes = name.as_bytes();
    matches!(bytes[0], b'a'..=b'z' | b'_')
        && bytes
            .iter()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_'))
}

/// A searchable collection: its name plus the ordered document fields its
/// search column is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIndexSpec {
    collection: String,
    searchable_fields: Vec<String>,
}

impl CollectionIndexSpec {
    /// Create a spec, validating the collection and field names.
    pub fn new(
        collection: impl Into<String>,
        searchable_fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, RegistryError> {
        let collection = collection.into();
        if !is_valid_identifier(&collection) {
            return Err(RegistryError::InvalidIdentifier(collection));
        }
        let searchable_fields: Vec<String> =
            searchable_fields.into_iter().map(Into::into).collect();
        if searchable_fields.is_empty() {
            return Err(RegistryError::NoSearchableFields(collection));
        }
        for field in &searchable_fields {
            if !is_valid_identifier(field) {
                return Err(RegistryError::InvalidIdentifier(field.clone()));
            }
        }
        Ok(Self {
            collection,
            searchable_fields,
        })
    }

    /// The collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The ordered document fields the search column is built from.
    pub fn searchable_fields(&self) -> &[String] {
        &self.searchable_fields
    }
}

/// Ordered, read-only set of [`CollectionIndexSpec`]s.
///
/// Registration happens once at startup; afterwards the registry only hands
/// out ordered iteration and name lookups.
#[derive(Debug, Clone, Default)]
pub struct IndexRegistry {
    specs: Vec<CollectionIndexSpec>,
}

impl IndexRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection. Rejects duplicates.
    pub fn register(&mut self, spec: CollectionIndexSpec) -> Result<(), RegistryError> {
        if self.contains(spec.collection()) {
            return Err(RegistryError::DuplicateCollection(
                spec.collection().to_string(),
            ));
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Iterate the registered specs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectionIndexSpec> {
        self.specs.iter()
    }

    /// Number of registered collections.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Returns true when `collection` is registered.
    pub fn contains(&self, collection: &str) -> bool {
        self.specs.iter().any(|s| s.collection() == collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(collection: &str, fields: &[&str]) -> CollectionIndexSpec {
        CollectionIndexSpec::new(collection, fields.iter().copied()).unwrap()
    }

    #[test]
    fn accepts_valid_identifiers() {
        assert!(is_valid_identifier("topic"));
        assert!(is_valid_identifier("motion_block"));
        assert!(is_valid_identifier("_internal"));
    }

    #[test]
    fn rejects_unsafe_identifiers() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("Topic"));
        assert!(!is_valid_identifier("1topic"));
        assert!(!is_valid_identifier("topic; drop table models"));
        assert!(!is_valid_identifier("topic'"));
        assert!(!is_valid_identifier(&"a".repeat(64)));
    }

    #[test]
    fn spec_rejects_invalid_collection() {
        assert_eq!(
            CollectionIndexSpec::new("Topic", ["title"]),
            Err(RegistryError::InvalidIdentifier("Topic".to_string()))
        );
    }

    #[test]
    fn spec_rejects_invalid_field() {
        assert_eq!(
            CollectionIndexSpec::new("topic", ["ti'tle"]),
            Err(RegistryError::InvalidIdentifier("ti'tle".to_string()))
        );
    }

    #[test]
    fn spec_rejects_empty_fields() {
        let no_fields: [&str; 0] = [];
        assert_eq!(
            CollectionIndexSpec::new("topic", no_fields),
            Err(RegistryError::NoSearchableFields("topic".to_string()))
        );
    }

    #[test]
    fn spec_preserves_field_order() {
        let spec = spec("topic", &["text", "title"]);
        assert_eq!(spec.searchable_fields(), ["text", "title"]);
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = IndexRegistry::new();
        registry.register(spec("topic", &["title"])).unwrap();
        assert_eq!(
            registry.register(spec("topic", &["text"])),
            Err(RegistryError::DuplicateCollection("topic".to_string()))
        );
    }

    #[test]
    fn registry_preserves_registration_order() {
        let mut registry = IndexRegistry::new();
        registry.register(spec("topic", &["text", "title"])).unwrap();
        registry
            .register(spec("motion_block", &["title", "internal"]))
            .unwrap();

        let order: Vec<&str> = registry.iter().map(|s| s.collection()).collect();
        assert_eq!(order, ["topic", "motion_block"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("motion_block"));
        assert!(!registry.contains("agenda_item"));
    }
}
