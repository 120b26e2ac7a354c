//! Search store backends

pub mod memory;
pub mod postgres;


use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::core::{Result, SearchQuery};

pub use memory::{CatalogueItem, InMemoryStore};
pub use postgres::PostgresStore;

/// A row as a store hands it back: column name to value, `None` for SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreRow {
    columns: BTreeMap<String, Option<String>>,
}

impl StoreRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(column.into(), Some(value.into()));
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Option<String>) {
        self.columns.insert(column.into(), value);
    }

    /// Value of `column`, or `None` when absent or NULL.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[async_trait]
pub trait SearchStore: Send + Sync {
    fn name(&self) -> &str;

    /// Runs one search and returns rows in the store's ranking order.
    async fn execute(&self, query: &SearchQuery) -> Result<Vec<StoreRow>>;

    async fn health_check(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_row_null_reads_as_missing() {
        let mut row = StoreRow::new().with("name", "Brie");
        row.insert("image", None);
        assert_eq!(row.get("name"), Some("Brie"));
        assert_eq!(row.get("image"), None);
        assert_eq!(row.get("aroma"), None);
        assert_eq!(row.len(), 2);
    }
}
