//! Structural validation, run before any query reaches the compiler.

use crate::{
    chart::{BasicQueryConfig, ChartQueryConfig, QueryType},
    error::InvalidQueryError,
    query::QueryOption,
};

/// Rejects basic configurations with no tables, or with a join whose target
/// does not resolve to any configured table alias or name.
pub fn validate_basic_config(config: &BasicQueryConfig) -> Result<(), InvalidQueryError> {
    if config.tables.is_empty() {
        return Err(InvalidQueryError::NoTables);
    }

    for join in &config.joins {
        let target = join
            .table_alias
            .as_deref()
            .or(join.table_name.as_deref())
            .ok_or(InvalidQueryError::MissingJoinTarget)?;

        let resolves = config
            .tables
            .iter()
            .any(|t| t.alias == target || t.name == target);
        if !resolves {
            return Err(InvalidQueryError::UnresolvedJoinTarget {
                alias: target.to_string(),
            });
        }
    }

    Ok(())
}

/// Checks that exactly one of the basic/advanced sub-configurations is
/// populated and that it matches the declared query type.
pub fn validate_chart_query_config(config: &ChartQueryConfig) -> Result<(), InvalidQueryError> {
    match config.query_type {
        QueryType::Basic => {
            if config.basic.is_none() {
                return Err(InvalidQueryError::MissingQueryConfig {
                    query_type: "basic",
                });
            }
            if config.advanced.is_some() {
                return Err(InvalidQueryError::ConflictingQueryConfig {
                    query_type: "basic",
                    conflicting: "advanced",
                });
            }
        }
        QueryType::Advanced => {
            if config.advanced.is_none() {
                return Err(InvalidQueryError::MissingQueryConfig {
                    query_type: "advanced",
                });
            }
            if config.basic.is_some() {
                return Err(InvalidQueryError::ConflictingQueryConfig {
                    query_type: "advanced",
                    conflicting: "basic",
                });
            }
        }
    }
    Ok(())
}

/// Structural pre-check used by the executor before compiling. Unlike the
/// config validators this reports a plain boolean; the executor converts it
/// to a failed run rather than an error escaping the scheduler.
pub fn validate_query(query: &QueryOption) -> bool {
    let Some(source) = &query.source else {
        return false;
    };
    if source.id.trim().is_empty() || source.source_type.trim().is_empty() {
        return false;
    }
    !query.fields.is_empty()
}
