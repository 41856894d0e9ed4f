//! Environment-derived service settings.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use search_service_repository::{RetryPolicy, StoreConfig};

/// Default port the HTTP surface binds to.
const DEFAULT_SERVICE_PORT: u16 = 9050;

/// Default autoupdate endpoint.
const DEFAULT_AUTOUPDATE_URL: &str = "http://localhost:9012/system/autoupdate";

/// Default number of connection attempts before startup fails.
const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;

/// Default delay before the second connection attempt.
const DEFAULT_RETRY_BASE_MS: u64 = 500;

/// Runtime settings for the search service.
#[derive(Debug, Clone)]
pub struct Settings {
    pub store: StoreConfig,
    pub service_port: u16,
    pub autoupdate_url: String,
}

impl Settings {
    /// Read settings from the environment, falling back to defaults.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_HOST`: database host (default: localhost)
    /// - `DATABASE_PORT`: database port (default: 5432)
    /// - `DATABASE_NAME` / `DATABASE_USER` / `DATABASE_PASSWORD`
    /// - `SEARCH_SERVICE_PORT`: HTTP port (default: 9050)
    /// - `AUTOUPDATE_URL`: autoupdate endpoint
    /// - `DEVELOPMENT`: expose the raw database handle for diagnostics
    /// - `DATABASE_CONNECT_ATTEMPTS` / `DATABASE_RETRY_BASE_MS`: retry budget
    pub fn from_env() -> Self {
        let defaults = StoreConfig::default();
        let store = StoreConfig {
            host: env::var("DATABASE_HOST").unwrap_or(defaults.host),
            port: env_parse("DATABASE_PORT", defaults.port),
            database: env::var("DATABASE_NAME").unwrap_or(defaults.database),
            user: env::var("DATABASE_USER").unwrap_or(defaults.user),
            password: env::var("DATABASE_PASSWORD").unwrap_or(defaults.password),
            max_connections: defaults.max_connections,
            dev_mode: env_flag("DEVELOPMENT"),
            retry: RetryPolicy {
                max_attempts: env_parse("DATABASE_CONNECT_ATTEMPTS", DEFAULT_CONNECT_ATTEMPTS),
                base_delay: Duration::from_millis(env_parse(
                    "DATABASE_RETRY_BASE_MS",
                    DEFAULT_RETRY_BASE_MS,
                )),
            },
        };
        Self {
            store,
            service_port: env_parse("SEARCH_SERVICE_PORT", DEFAULT_SERVICE_PORT),
            autoupdate_url: env::var("AUTOUPDATE_URL")
                .unwrap_or_else(|_| DEFAULT_AUTOUPDATE_URL.to_string()),
        }
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    matches!(
        env::var(key).unwrap_or_default().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
