//! Service-level error types.

use thiserror::Error;

use search_service_repository::SearchStoreError;
use search_service_shared::{QueryRejected, RegistryError};

use crate::autoupdate::AutoupdateError;

/// Errors that can occur during service initialization or request handling.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Collection registration error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Storage error.
    #[error("Store error: {0}")]
    Store(#[from] SearchStoreError),

    /// The query could not be turned into a search expression.
    #[error("Rejected query: {0}")]
    Query(#[from] QueryRejected),

    /// The autoupdate collaborator failed.
    #[error("Autoupdate error: {0}")]
    Autoupdate(#[from] AutoupdateError),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
