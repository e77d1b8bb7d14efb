use crate::ChartId;
use connectors::error::StorageError;
use query_builder::InvalidArgumentError;
use thiserror::Error;

/// Failure of a single chart refresh run. These never escape the scheduler's
/// timer loop; the registry converts them into a FAILED schedule status.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The stored query failed the structural pre-check.
    #[error("query for chart {chart_id} is structurally invalid")]
    InvalidQuery { chart_id: ChartId },

    #[error("chart {chart_id} has no stored query definition")]
    UnknownChart { chart_id: ChartId },

    #[error("compile error: {0}")]
    Compile(#[from] InvalidArgumentError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failures of the schedule administration API.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid cron expression '{expr}': {source}")]
    InvalidCron {
        expr: String,
        #[source]
        source: cron::error::Error,
    },

    #[error("no schedule registered for chart {0}")]
    UnknownChart(ChartId),
}
