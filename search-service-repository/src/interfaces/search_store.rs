//! Search store trait definition.
//!
//! This module defines the abstract interface for schema provisioning and
//! text-search queries, allowing the orchestration layer to run against
//! different backends (PostgreSQL in production, mocks in tests).

use async_trait::async_trait;

use search_service_shared::{Fqid, MatchedDocument, SearchExpression};

use crate::errors::SearchStoreError;

/// Abstracts the storage engine behind schema provisioning and search.
///
/// Implementations are injected into the orchestrator as `Arc<dyn
/// SearchStore>` to enable dependency injection and testing with mock
/// backends. Provisioning methods are idempotent: repeating them for the
/// same collection must not error and must not create duplicate schema
/// objects.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Add the collection's search column to the shared table if absent.
    async fn ensure_search_column(&self, collection: &str) -> Result<(), SearchStoreError>;

    /// Recompute the search column for the collection's existing rows and
    /// create the inverted index over it if absent.
    ///
    /// Must run after [`ensure_search_column`](Self::ensure_search_column)
    /// has completed for the same collection.
    async fn provision_index(
        &self,
        collection: &str,
        fields: &[String],
    ) -> Result<(), SearchStoreError>;

    /// Install (or re-install) the trigger that keeps the search column
    /// consistent on future inserts and updates.
    ///
    /// Must run after the collection's search column exists.
    async fn provision_trigger(
        &self,
        collection: &str,
        fields: &[String],
    ) -> Result<(), SearchStoreError>;

    /// Return the rows of `collection` matching `expression`.
    async fn query(
        &self,
        collection: &str,
        expression: &SearchExpression,
    ) -> Result<Vec<MatchedDocument>, SearchStoreError>;

    /// Return the fqids of all stored rows, across all collections.
    async fn list_fqids(&self) -> Result<Vec<Fqid>, SearchStoreError>;
}
