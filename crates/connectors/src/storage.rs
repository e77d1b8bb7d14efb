use crate::error::StorageError;
use async_trait::async_trait;
use model::records::Row;
use serde::{Deserialize, Serialize};

/// Describes the dedicated result table a chart materializes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }
}

/// Boundary to the engine that actually runs compiled SQL and stores rows.
/// This crate never interprets SQL itself.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Runs a compiled SQL statement and returns the result rows.
    async fn execute_query(&self, sql: &str) -> Result<Vec<Row>, StorageError>;

    /// Appends `rows` to `table`, returning the number of rows written.
    async fn batch_insert(&self, table: &TableSpec, rows: &[Row]) -> Result<u64, StorageError>;
}
