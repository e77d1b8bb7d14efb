
use crate::{
    ChartId,
    executor::QueryExecutor,
    registry::ScheduleRegistry,
    source::{ChartQuery, StaticQuerySource},
};
use connectors::{memory::MemoryStorage, storage::TableSpec};
use model::{
    query::{QueryOption, SourceRef, field::Field},
    records::Row,
};
use query_builder::TableMap;
use serde_json::json;
use std::sync::Arc;

/// A cron that never fires within a test run.
pub(crate) const FAR_FUTURE: &str = "0 0 0 1 1 * 2099";
/// Fires every second.
pub(crate) const EVERY_SECOND: &str = "* * * * * *";

pub(crate) fn chart_query(chart_id: ChartId) -> ChartQuery {
    ChartQuery {
        chart_id,
        query: QueryOption {
            source: Some(SourceRef {
                id: "src-1".to_string(),
                source_type: "csv".to_string(),
            }),
            fields: vec![Field::new("src-1", "amount")],
            ..Default::default()
        },
        tables: TableMap::from([("src-1".to_string(), "orders".to_string())]),
        main_table: "orders".to_string(),
        result_table: TableSpec::new(format!("chart_{chart_id}_result")),
    }
}

pub(crate) fn sample_row() -> Row {
    let mut row = Row::new();
    row.insert("amount".to_string(), json!(42));
    row
}

/// Builds a registry over in-memory storage primed with one result row.
pub(crate) async fn harness(
    storage: Arc<MemoryStorage>,
    charts: Vec<ChartQuery>,
) -> ScheduleRegistry {
    storage.set_results(vec![sample_row()]).await;
    let queries = Arc::new(StaticQuerySource::new());
    for chart in charts {
        queries.insert(chart).await;
    }
    ScheduleRegistry::new(QueryExecutor::new(storage, queries))
}
