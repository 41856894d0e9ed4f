//! Provisioning and query fan-out across registered collections.
//!
//! At startup the orchestrator drives the registry through three ordered
//! provisioning phases against the store. At query time it sanitizes the
//! raw input once, queries every selected collection concurrently and
//! aggregates the per-collection results in registry order.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use search_service_repository::SearchStore;
use search_service_shared::{sanitize, CollectionIndexSpec, IndexRegistry, SearchResult};

use crate::autoupdate::AutoupdatePort;
use crate::errors::ServiceError;

/// A collection whose query failed at the storage layer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CollectionFailure {
    pub collection: String,
    pub error: String,
}

/// Aggregated outcome of one search request.
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    /// One entry per successfully queried collection, in registry order.
    pub results: Vec<SearchResult>,
    /// Collections whose query failed; sibling results are unaffected.
    pub failures: Vec<CollectionFailure>,
    /// Opaque enrichment payload from the autoupdate collaborator.
    pub autoupdate: Value,
}

/// Orchestrator coordinating provisioning and request serving.
///
/// All collaborators are injected at construction, so tests can substitute
/// mock stores and autoupdate ports.
pub struct SearchOrchestrator {
    store: Arc<dyn SearchStore>,
    registry: Arc<IndexRegistry>,
    autoupdate: Arc<dyn AutoupdatePort>,
}

impl SearchOrchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        store: Arc<dyn SearchStore>,
        registry: Arc<IndexRegistry>,
        autoupdate: Arc<dyn AutoupdatePort>,
    ) -> Self {
        Self {
            store,
            registry,
            autoupdate,
        }
    }

    /// Provision search columns, indexes and triggers for every registered
    /// collection.
    ///
    /// Runs in three phases with a barrier between them: index and trigger
    /// creation require the collection's column to exist, so all columns are
    /// ensured across all collections before the first backfill starts, and
    /// all backfills finish before the first trigger is installed.
    #[instrument(skip(self))]
    pub async fn provision(&self) -> Result<(), ServiceError> {
        try_join_all(
            self.registry
                .iter()
                .map(|spec| self.store.ensure_search_column(spec.collection())),
        )
        .await?;
        try_join_all(self.registry.iter().map(|spec| {
            self.store
                .provision_index(spec.collection(), spec.searchable_fields())
        }))
        .await?;
        try_join_all(self.registry.iter().map(|spec| {
            self.store
                .provision_trigger(spec.collection(), spec.searchable_fields())
        }))
        .await?;
        info!(collections = self.registry.len(), "Search indices provisioned");
        Ok(())
    }

    /// Log how many rows each collection currently holds.
    pub async fn log_collection_counts(&self) -> Result<(), ServiceError> {
        let fqids = self.store.list_fqids().await?;
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for fqid in fqids {
            *counts.entry(fqid.collection).or_default() += 1;
        }
        debug!(collections = counts.len(), "Collection inventory");
        for (collection, entries) in &counts {
            debug!(collection = %collection, entries, "Collection contents");
        }
        Ok(())
    }

    /// Run one search across the registered collections.
    ///
    /// The raw query is sanitized once. When `collections` is given, only
    /// matching registry entries are queried; unknown names are skipped with
    /// a warning. Per-collection queries run concurrently; the aggregate
    /// keeps registry order regardless of completion order, including
    /// entries with zero matches. A failing collection lands in `failures`
    /// without affecting the others. The aggregated results are handed to
    /// the autoupdate collaborator before the outcome is returned.
    #[instrument(skip(self, raw_query))]
    pub async fn search(
        &self,
        raw_query: &str,
        collections: Option<&[String]>,
    ) -> Result<SearchOutcome, ServiceError> {
        let expression = sanitize(raw_query)?;
        debug!(expression = %expression, "Sanitized search query");

        if let Some(requested) = collections {
            for name in requested {
                if !self.registry.contains(name) {
                    warn!(collection = %name, "Requested collection is not registered, skipping");
                }
            }
        }

        let selected: Vec<&CollectionIndexSpec> = self
            .registry
            .iter()
            .filter(|spec| {
                collections.map_or(true, |wanted| wanted.iter().any(|w| w == spec.collection()))
            })
            .collect();

        let lookups = selected.iter().map(|&spec| {
            let expression = &expression;
            async move { (spec, self.store.query(spec.collection(), expression).await) }
        });

        let mut results = Vec::with_capacity(selected.len());
        let mut failures = Vec::new();
        for (spec, outcome) in join_all(lookups).await {
            match outcome {
                Ok(documents) => {
                    let ids = documents.into_iter().map(|doc| doc.fqid.id).collect();
                    results.push(SearchResult::new(
                        spec.collection(),
                        ids,
                        spec.searchable_fields(),
                    ));
                }
                Err(error) => {
                    warn!(
                        collection = spec.collection(),
                        error = %error,
                        "Collection query failed"
                    );
                    failures.push(CollectionFailure {
                        collection: spec.collection().to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }

        debug!(
            results = results.len(),
            failures = failures.len(),
            "Search aggregated"
        );
        let autoupdate = self.autoupdate.request(&results).await?;
        Ok(SearchOutcome {
            results,
            failures,
            autoupdate,
        })
    }
}
