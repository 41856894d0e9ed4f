//! This module defines and re-exports the error types for the search store.

mod search_store_error;

pub use search_store_error::SearchStoreError;
