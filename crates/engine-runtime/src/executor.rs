//! One end-to-end refresh of a chart's data: validate, rewrite, compile,
//! execute, persist.

use crate::{ChartId, error::ExecutionError, retry::RetryPolicy, source::ChartQuerySource};
use connectors::{error::StorageError, storage::StorageService};
use model::{query::QueryOption, validate};
use serde::Serialize;
use std::{sync::Arc, time::Duration, time::Instant};
use tracing::{debug, info};

/// Outcome of one successful refresh run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub chart_id: ChartId,
    pub row_count: u64,
    pub duration: Duration,
}

pub struct QueryExecutor {
    storage: Arc<dyn StorageService>,
    queries: Arc<dyn ChartQuerySource>,
    retry: RetryPolicy,
}

impl QueryExecutor {
    pub fn new(storage: Arc<dyn StorageService>, queries: Arc<dyn ChartQuerySource>) -> Self {
        Self {
            storage,
            queries,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Runs one refresh for `chart_id` and persists the result rows into the
    /// chart's result table. Errors are typed so callers can assert on the
    /// failure kind; the schedule registry is the layer that recovers them.
    pub async fn execute_and_save(&self, chart_id: ChartId) -> Result<RunSummary, ExecutionError> {
        let started = Instant::now();

        let chart = self
            .queries
            .chart_query(chart_id)
            .await
            .ok_or(ExecutionError::UnknownChart { chart_id })?;

        if !validate::validate_query(&chart.query) {
            return Err(ExecutionError::InvalidQuery { chart_id });
        }

        let optimized = optimize_query(&chart.query);
        let sql = query_builder::compile(&optimized, &chart.tables, &chart.main_table)?;
        debug!(chart_id, %sql, "compiled chart query");

        let rows = self
            .retry
            .run(
                || self.storage.execute_query(&sql),
                StorageError::is_transient,
            )
            .await?;

        let row_count = self
            .retry
            .run(
                || self.storage.batch_insert(&chart.result_table, &rows),
                StorageError::is_transient,
            )
            .await?;

        info!(chart_id, row_count, "chart refresh complete");
        Ok(RunSummary {
            chart_id,
            row_count,
            duration: started.elapsed(),
        })
    }
}

/// Structure-preserving rewrite seam. Every section is copied through
/// unchanged today; cost-based rewrites slot in here without changing the
/// call contract.
pub fn optimize_query(query: &QueryOption) -> QueryOption {
    QueryOption {
        source: query.source.clone(),
        table: query.table.clone(),
        fields: query.fields.clone(),
        filters: query.filters.clone(),
        sort: query.sort.clone(),
        group_by: query.group_by.clone(),
        having: query.having.clone(),
        joins: query.joins.clone(),
        pagination: query.pagination,
    }
}
