//! PostgreSQL implementation of the search store.

mod store;

pub use store::PostgresSearchStore;
