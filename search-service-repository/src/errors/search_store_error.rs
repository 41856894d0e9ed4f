//! Error types for the search store.

use thiserror::Error;

/// Errors from search store operations.
///
/// Provisioning statements that merely report an already existing column,
/// index, function or trigger are absorbed inside the PostgreSQL
/// implementation and never surface here.
#[derive(Debug, Error)]
pub enum SearchStoreError {
    /// Failed to establish or verify the database session.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed at the storage layer.
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    /// A collection or field name is not a safe SQL identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A stored row could not be mapped back into a document.
    #[error("Malformed row: {0}")]
    MalformedRow(String),
}

impl SearchStoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier(name.into())
    }

    /// Create a malformed row error.
    pub fn malformed_row(msg: impl Into<String>) -> Self {
        Self::MalformedRow(msg.into())
    }
}
