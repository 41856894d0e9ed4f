//! Dependency initialization and wiring for the search service.

use std::sync::Arc;

use tracing::{error, info};

use search_service_repository::{PostgresSearchStore, SearchStore};
use search_service_shared::{CollectionIndexSpec, IndexRegistry};

use crate::autoupdate::HttpAutoupdate;
use crate::config::Settings;
use crate::errors::ServiceError;
use crate::orchestrator::SearchOrchestrator;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator, provisioned and ready to serve.
    pub orchestrator: Arc<SearchOrchestrator>,
    /// Settings the service was initialized with.
    pub settings: Settings,
}

/// Assemble the registry of searchable collections.
///
/// Adding a searchable collection means adding one spec here; the rest of
/// the pipeline is generic over the registry's contents.
pub fn searchable_collections() -> Result<IndexRegistry, ServiceError> {
    let mut registry = IndexRegistry::new();
    registry.register(CollectionIndexSpec::new("topic", ["text", "title"])?)?;
    registry.register(CollectionIndexSpec::new(
        "motion_block",
        ["title", "internal"],
    )?)?;
    Ok(registry)
}

impl Dependencies {
    /// Initialize all dependencies from environment settings.
    ///
    /// Establishes the database session (fatal after the retry budget),
    /// provisions every registered collection in three phases and wires the
    /// orchestrator.
    pub async fn new() -> Result<Self, ServiceError> {
        let settings = Settings::from_env();
        info!(
            database_host = %settings.store.host,
            database_port = settings.store.port,
            database = %settings.store.database,
            service_port = settings.service_port,
            autoupdate_url = %settings.autoupdate_url,
            dev_mode = settings.store.dev_mode,
            "Initializing dependencies"
        );

        let store = PostgresSearchStore::new(&settings.store);
        let version = store.check_connection().await.map_err(|e| {
            error!(error = %e, "Database is unreachable");
            ServiceError::Store(e)
        })?;
        info!(version = %version, "Database connection established");

        let registry = searchable_collections()?;
        let store: Arc<dyn SearchStore> = Arc::new(store);
        let autoupdate = Arc::new(HttpAutoupdate::new(settings.autoupdate_url.clone()));
        let orchestrator = Arc::new(SearchOrchestrator::new(
            store,
            Arc::new(registry),
            autoupdate,
        ));

        orchestrator.provision().await?;
        info!("Search indices created");
        orchestrator.log_collection_counts().await?;

        Ok(Self {
            orchestrator,
            settings,
        })
    }
}
