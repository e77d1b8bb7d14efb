use crate::ChartId;
use async_trait::async_trait;
use connectors::storage::TableSpec;
use model::query::QueryOption;
use query_builder::TableMap;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Everything needed to refresh one chart: the saved query, the table
/// resolution for this chart's sources, and the result table it
/// materializes into.
#[derive(Debug, Clone)]
pub struct ChartQuery {
    pub chart_id: ChartId,
    pub query: QueryOption,
    pub tables: TableMap,
    pub main_table: String,
    pub result_table: TableSpec,
}

/// Supplies chart query definitions at trigger time, so the scheduling API
/// only ever deals in chart identifiers.
#[async_trait]
pub trait ChartQuerySource: Send + Sync {
    async fn chart_query(&self, chart_id: ChartId) -> Option<ChartQuery>;
}

/// Fixed in-memory definitions; backs tests and the one-shot CLI path.
#[derive(Default)]
pub struct StaticQuerySource {
    charts: RwLock<HashMap<ChartId, ChartQuery>>,
}

impl StaticQuerySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, chart: ChartQuery) {
        self.charts.write().await.insert(chart.chart_id, chart);
    }
}

#[async_trait]
impl ChartQuerySource for StaticQuerySource {
    async fn chart_query(&self, chart_id: ChartId) -> Option<ChartQuery> {
        self.charts.read().await.get(&chart_id).cloned()
    }
}
