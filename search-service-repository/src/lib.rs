//! # Search Service Repository
//!
//! This crate provides the storage boundary of the collection search
//! service. It includes definitions for errors, interfaces, retry policy,
//! and a concrete implementation for PostgreSQL.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod postgres;
pub mod retry;

pub use config::StoreConfig;
pub use errors::SearchStoreError;
pub use interfaces::SearchStore;
pub use postgres::PostgresSearchStore;
pub use retry::RetryPolicy;
