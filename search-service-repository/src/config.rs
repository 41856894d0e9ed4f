//! Configuration for the PostgreSQL search store.

use crate::retry::RetryPolicy;

/// Connection settings for the shared models database.
///
/// `max_connections` defaults to one: the whole process shares a single
/// database session, established lazily on first use and held for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    /// Size of the connection pool.
    pub max_connections: u32,
    /// Whether the raw pool handle may be exposed for diagnostics.
    pub dev_mode: bool,
    /// Retry budget for the connection probe and for queries.
    pub retry: RetryPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "search".to_string(),
            user: "search".to_string(),
            password: "search".to_string(),
            max_connections: 1,
            dev_mode: false,
            retry: RetryPolicy::default(),
        }
    }
}
