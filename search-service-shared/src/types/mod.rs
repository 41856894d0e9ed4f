//! This module defines the core data structures used across the search
//! service. It re-exports the fqid, request and result types.

pub mod fqid;
pub mod search_request;
pub mod search_result;

pub use fqid::Fqid;
pub use search_request::SearchRequest;
pub use search_result::{MatchedDocument, SearchResult};
