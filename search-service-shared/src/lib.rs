//! # Search Service Shared
//!
//! This crate defines shared data structures and pure logic used across the
//! collection search service: fully-qualified ids, the registry of searchable
//! collections, result shapes and the free-text query sanitizer.

pub mod query;
pub mod registry;
pub mod types;

pub use query::{sanitize, QueryRejected, SearchExpression};
pub use registry::{CollectionIndexSpec, IndexRegistry, RegistryError};
pub use types::fqid::{Fqid, FqidParseError};
pub use types::search_request::SearchRequest;
pub use types::search_result::{MatchedDocument, SearchResult};
