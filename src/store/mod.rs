//! External store collaborator.
//!
//! The service never talks to Postgres directly. Every request turns into exactly one of four
//! table-level primitives issued against the hosted store's REST surface; `TableStore` is the
//! seam, `RestStore` the production implementation and `MemoryStore` the in-process one.

pub mod error;
pub mod memory;
pub mod query;
pub mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use query::{Filter, Order, Query, SortDirection};
pub use rest::RestStore;

/// One stored row, keyed by column name
pub type Row = Map<String, Value>;

/// Shared, injected store handle
pub type SharedStore = Arc<dyn TableStore>;

#[async_trait]
pub trait TableStore: Send + Sync {
    /// SELECT * with optional equality filter and ordering
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Row>, StoreError>;

    /// INSERT, returning the stored rows
    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<Vec<Row>, StoreError>;

    /// UPDATE rows matching `filter` with `patch`, returning the updated rows
    async fn update(&self, table: &str, filter: &Filter, patch: Row) -> Result<Vec<Row>, StoreError>;

    /// DELETE rows matching `filter`, returning the removed rows
    async fn delete(&self, table: &str, filter: &Filter) -> Result<Vec<Row>, StoreError>;
}

/// Table names go straight into request paths, so only plain identifiers are accepted
pub(crate) fn validate_table(table: &str) -> Result<(), StoreError> {
    let valid = !table.is_empty()
        && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !table.starts_with(|c: char| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_table_names() {
        assert!(validate_table("projects").is_ok());
        assert!(validate_table("user_profiles_2").is_ok());
        assert!(validate_table("").is_err());
        assert!(validate_table("2fa").is_err());
        assert!(validate_table("projects?select=*").is_err());
        assert!(validate_table("../auth/v1").is_err());
    }
}
