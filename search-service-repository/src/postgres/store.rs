//! PostgreSQL-backed search store.
//!
//! Extends the shared `models` table with one `tsvector` column, one GIN
//! index and one trigger function/trigger pair per registered collection,
//! and serves text-search queries against those columns. The table itself is
//! owned by other services; this store only ever adds to it.
//!
//! Identifier safety: collection and field names are re-validated against
//! the registry's identifier grammar before they reach generated SQL text.
//! Caller-supplied values (the search expression, the fqid prefix) are bound
//! as statement parameters, never interpolated.

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use search_service_shared::registry::is_valid_identifier;
use search_service_shared::{Fqid, MatchedDocument, SearchExpression};

use crate::config::StoreConfig;
use crate::errors::SearchStoreError;
use crate::interfaces::SearchStore;
use crate::retry::{with_retry, RetryPolicy};

/// SQLSTATE codes reported when a schema object already exists: duplicate
/// column, duplicate object (trigger), duplicate function, duplicate
/// table/index.
const ALREADY_EXISTS_CODES: &[&str] = &["42701", "42710", "42723", "42P07"];

/// PostgreSQL implementation of [`SearchStore`].
///
/// Holds the single process-wide database session. The pool is created
/// without a round trip; the session is established on first use. Call
/// [`check_connection`](Self::check_connection) during startup to fail fast
/// when the database is unreachable.
pub struct PostgresSearchStore {
    pool: PgPool,
    retry: RetryPolicy,
    dev_mode: bool,
}

impl PostgresSearchStore {
    /// Create a store over a lazily-established connection.
    pub fn new(config: &StoreConfig) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(options);
        Self {
            pool,
            retry: config.retry,
            dev_mode: config.dev_mode,
        }
    }

    /// Wrap an existing pool. Used by tests that bring their own database.
    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            pool,
            retry: RetryPolicy::default(),
            dev_mode: false,
        }
    }

    /// Verify the session can be established and return the server version.
    ///
    /// Retried per the configured policy; a failure after the retry budget
    /// means the database is unreachable and startup must abort.
    pub async fn check_connection(&self) -> Result<String, SearchStoreError> {
        let version = with_retry(self.retry, "check_connection", || {
            sqlx::query_scalar::<_, String>("SELECT version()").fetch_one(&self.pool)
        })
        .await
        .map_err(|e| SearchStoreError::connection(e.to_string()))?;
        Ok(version)
    }

    /// The raw pool handle, exposed only in development mode.
    pub fn debug_pool(&self) -> Option<&PgPool> {
        self.dev_mode.then_some(&self.pool)
    }
}

/// Validate `name` against the identifier grammar before it is spliced into
/// SQL text as an identifier.
fn validated(name: &str) -> Result<&str, SearchStoreError> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(SearchStoreError::invalid_identifier(name))
    }
}

fn validated_fields(fields: &[String]) -> Result<(), SearchStoreError> {
    if fields.is_empty() {
        return Err(SearchStoreError::invalid_identifier(
            "empty searchable field list",
        ));
    }
    for field in fields {
        validated(field)?;
    }
    Ok(())
}

/// Deterministic search column name for a collection.
fn search_column(collection: &str) -> String {
    format!("{collection}_view_search")
}

/// `to_tsvector(coalesce(<prefix>data ->> '<field>', ''))` per field,
/// concatenated with `||`. `row_prefix` is `"new."` inside the trigger
/// function and empty for the backfill.
fn tsvector_expression(fields: &[String], row_prefix: &str) -> String {
    fields
        .iter()
        .map(|field| format!("to_tsvector(coalesce({row_prefix}data ->> '{field}', ''))"))
        .collect::<Vec<_>>()
        .join(" || ")
}

/// Returns true when the database reported the schema object as already
/// existing.
fn is_already_exists(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db
            .code()
            .map_or(false, |code| ALREADY_EXISTS_CODES.contains(&code.as_ref())),
        _ => false,
    }
}

#[async_trait]
impl SearchStore for PostgresSearchStore {
    async fn ensure_search_column(&self, collection: &str) -> Result<(), SearchStoreError> {
        let column = search_column(validated(collection)?);
        let statement = format!("ALTER TABLE models ADD COLUMN {column} tsvector");
        match sqlx::query(&statement).execute(&self.pool).await {
            Ok(_) => {
                info!(collection, column = %column, "Search column created");
                Ok(())
            }
            Err(error) if is_already_exists(&error) => {
                debug!(collection, column = %column, "Search column already exists");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn provision_index(
        &self,
        collection: &str,
        fields: &[String],
    ) -> Result<(), SearchStoreError> {
        let column = search_column(validated(collection)?);
        validated_fields(fields)?;

        let backfill = format!(
            "UPDATE models SET {column} = {} WHERE fqid LIKE $1",
            tsvector_expression(fields, "")
        );
        let updated = sqlx::query(&backfill)
            .bind(format!("{collection}/%"))
            .execute(&self.pool)
            .await?;
        debug!(
            collection,
            rows = updated.rows_affected(),
            "Search column backfilled"
        );

        let create_index =
            format!("CREATE INDEX IF NOT EXISTS {column}_idx ON models USING gin ({column})");
        match sqlx::query(&create_index).execute(&self.pool).await {
            Ok(_) => {
                info!(collection, index = %format!("{column}_idx"), "Search index ready");
                Ok(())
            }
            Err(error) if is_already_exists(&error) => {
                debug!(collection, "Search index already exists");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn provision_trigger(
        &self,
        collection: &str,
        fields: &[String],
    ) -> Result<(), SearchStoreError> {
        let column = search_column(validated(collection)?);
        validated_fields(fields)?;

        let function = format!(
            "CREATE OR REPLACE FUNCTION {column}_trigger_fn() RETURNS trigger AS $$\n\
             BEGIN\n\
                 new.{column} = {};\n\
                 RETURN new;\n\
             END\n\
             $$ LANGUAGE plpgsql",
            tsvector_expression(fields, "new.")
        );
        match sqlx::query(&function).execute(&self.pool).await {
            Ok(_) => debug!(collection, "Trigger function installed"),
            Err(error) if is_already_exists(&error) => {
                debug!(collection, "Trigger function already exists")
            }
            Err(error) => return Err(error.into()),
        }

        let trigger = format!(
            "CREATE TRIGGER {column}_trigger BEFORE INSERT OR UPDATE ON models \
             FOR EACH ROW EXECUTE FUNCTION {column}_trigger_fn()"
        );
        match sqlx::query(&trigger).execute(&self.pool).await {
            Ok(_) => {
                info!(collection, trigger = %format!("{column}_trigger"), "Trigger installed");
                Ok(())
            }
            Err(error) if is_already_exists(&error) => {
                debug!(collection, "Trigger already exists");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn query(
        &self,
        collection: &str,
        expression: &SearchExpression,
    ) -> Result<Vec<MatchedDocument>, SearchStoreError> {
        let column = search_column(validated(collection)?);
        // The search column is only ever populated for rows of this
        // collection's fqid prefix, so no collection filter clause is needed.
        let statement = format!("SELECT fqid, data FROM models WHERE {column} @@ to_tsquery($1)");

        let rows = with_retry(self.retry, "query", || {
            sqlx::query(&statement)
                .bind(expression.as_str())
                .fetch_all(&self.pool)
        })
        .await?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            let fqid: String = row.try_get("fqid")?;
            let data: serde_json::Value = row.try_get("data")?;
            let fqid = fqid
                .parse::<Fqid>()
                .map_err(|e| SearchStoreError::malformed_row(e.to_string()))?;
            documents.push(MatchedDocument { fqid, data });
        }
        debug!(collection, matches = documents.len(), "Search query answered");
        Ok(documents)
    }

    async fn list_fqids(&self) -> Result<Vec<Fqid>, SearchStoreError> {
        let rows = sqlx::query("SELECT fqid FROM models")
            .fetch_all(&self.pool)
            .await?;
        let mut fqids = Vec::with_capacity(rows.len());
        for row in rows {
            let raw: String = row.try_get("fqid")?;
            match raw.parse::<Fqid>() {
                Ok(fqid) => fqids.push(fqid),
                Err(error) => debug!(fqid = %raw, error = %error, "Skipping malformed fqid"),
            }
        }
        Ok(fqids)
    }
}
