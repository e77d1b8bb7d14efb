use crate::error::CliError;
use clap::Subcommand;
use connectors::{memory::MemoryStorage, storage::TableSpec};
use engine_runtime::{
    executor::QueryExecutor,
    source::{ChartQuery, StaticQuerySource},
};
use model::{chart::ChartQueryConfig, query::QueryOption, validate};
use query_builder::TableMap;
use std::sync::Arc;
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a structured query file into SQL and print it.
    Compile {
        /// Path to the query JSON (wire shape).
        #[arg(long)]
        query: String,
        /// Path to the source-id to table-name map JSON.
        #[arg(long)]
        tables: String,
        /// Resolved FROM table name.
        #[arg(long)]
        main_table: String,
    },
    /// Validate a chart query configuration file.
    Validate {
        #[arg(long)]
        config: String,
    },
    /// Run a one-shot refresh against the in-memory storage.
    Refresh {
        #[arg(long)]
        query: String,
        #[arg(long)]
        tables: String,
        #[arg(long)]
        main_table: String,
        /// Result table the refreshed rows are written to.
        #[arg(long)]
        result_table: String,
    },
}

pub async fn compile(query_path: &str, tables_path: &str, main_table: &str) -> Result<(), CliError> {
    let (query, tables) = load_query(query_path, tables_path).await?;
    let sql = query_builder::compile(&query, &tables, main_table)?;
    println!("{sql}");
    Ok(())
}

pub async fn validate(config_path: &str) -> Result<(), CliError> {
    let raw = tokio::fs::read_to_string(config_path).await?;
    let config: ChartQueryConfig = serde_json::from_str(&raw)?;

    validate::validate_chart_query_config(&config)?;
    if let Some(basic) = &config.basic {
        validate::validate_basic_config(basic)?;
    }

    println!("configuration is valid");
    Ok(())
}

pub async fn refresh(
    query_path: &str,
    tables_path: &str,
    main_table: &str,
    result_table: &str,
) -> Result<(), CliError> {
    let (query, tables) = load_query(query_path, tables_path).await?;

    let storage = Arc::new(MemoryStorage::new());
    let queries = Arc::new(StaticQuerySource::new());
    queries
        .insert(ChartQuery {
            chart_id: 1,
            query,
            tables,
            main_table: main_table.to_string(),
            result_table: TableSpec::new(result_table),
        })
        .await;

    let executor = QueryExecutor::new(storage, queries);
    let summary = executor.execute_and_save(1).await?;
    info!(
        chart_id = summary.chart_id,
        rows = summary.row_count,
        "refresh complete"
    );
    println!(
        "refreshed chart {} ({} rows in {:?})",
        summary.chart_id, summary.row_count, summary.duration
    );
    Ok(())
}

async fn load_query(
    query_path: &str,
    tables_path: &str,
) -> Result<(QueryOption, TableMap), CliError> {
    let query: QueryOption = serde_json::from_str(&tokio::fs::read_to_string(query_path).await?)?;
    let tables: TableMap = serde_json::from_str(&tokio::fs::read_to_string(tables_path).await?)?;
    Ok((query, tables))
}
