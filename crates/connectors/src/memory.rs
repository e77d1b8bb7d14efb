//! In-memory storage used by tests and the one-shot CLI path. Records every
//! executed statement and can be primed with canned results, injected
//! failures, and artificial latency.

use crate::{
    error::StorageError,
    storage::{StorageService, TableSpec},
};
use async_trait::async_trait;
use model::records::Row;
use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
pub struct MemoryStorage {
    inner: Mutex<Inner>,
    latency: Option<Duration>,
}

#[derive(Default)]
struct Inner {
    tables: HashMap<String, Vec<Row>>,
    executed: Vec<String>,
    results: Vec<Row>,
    failures: VecDeque<StorageError>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every storage call sleeps this long first; used to exercise the
    /// scheduler's overlap guard.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Sets the rows every subsequent `execute_query` returns.
    pub async fn set_results(&self, rows: Vec<Row>) {
        self.inner.lock().await.results = rows;
    }

    /// Queues an error; storage calls consume queued errors first, in order.
    pub async fn push_failure(&self, error: StorageError) {
        self.inner.lock().await.failures.push_back(error);
    }

    pub async fn executed_statements(&self) -> Vec<String> {
        self.inner.lock().await.executed.clone()
    }

    pub async fn table_rows(&self, table: &str) -> Vec<Row> {
        self.inner
            .lock()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl StorageService for MemoryStorage {
    async fn execute_query(&self, sql: &str) -> Result<Vec<Row>, StorageError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let mut inner = self.inner.lock().await;
        inner.executed.push(sql.to_string());
        if let Some(err) = inner.failures.pop_front() {
            return Err(err);
        }
        debug!(sql, "executed query");
        Ok(inner.results.clone())
    }

    async fn batch_insert(&self, table: &TableSpec, rows: &[Row]) -> Result<u64, StorageError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let mut inner = self.inner.lock().await;
        if let Some(err) = inner.failures.pop_front() {
            return Err(err);
        }
        inner
            .tables
            .entry(table.name.clone())
            .or_default()
            .extend(rows.iter().cloned());
        debug!(table = %table.name, rows = rows.len(), "batch insert");
        Ok(rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(key: &str, value: serde_json::Value) -> Row {
        let mut row = Row::new();
        row.insert(key.to_string(), value);
        row
    }

    #[tokio::test]
    async fn records_executed_statements() {
        let storage = MemoryStorage::new();
        storage.set_results(vec![row("n", json!(1))]).await;

        let rows = storage.execute_query("SELECT 1").await.unwrap();
        assert_eq!(rows, vec![row("n", json!(1))]);
        assert_eq!(storage.executed_statements().await, vec!["SELECT 1"]);
    }

    #[tokio::test]
    async fn queued_failures_are_consumed_in_order() {
        let storage = MemoryStorage::new();
        storage
            .push_failure(StorageError::Unavailable("down".to_string()))
            .await;

        assert!(storage.execute_query("SELECT 1").await.is_err());
        assert!(storage.execute_query("SELECT 1").await.is_ok());
    }

    #[tokio::test]
    async fn batch_insert_appends_to_the_table() {
        let storage = MemoryStorage::new();
        let table = TableSpec::new("chart_7_result");

        storage
            .batch_insert(&table, &[row("a", json!(1))])
            .await
            .unwrap();
        storage
            .batch_insert(&table, &[row("a", json!(2))])
            .await
            .unwrap();

        assert_eq!(storage.table_rows("chart_7_result").await.len(), 2);
    }
}
