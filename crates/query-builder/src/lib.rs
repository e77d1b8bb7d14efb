//! Compiles a structured query description into a single SQL string.
//!
//! The compiler is a pure function over the query model plus a source-id to
//! table-name resolution map. Malformed optional sections degrade to clause
//! omission; only missing required inputs are errors.

use model::query::QueryOption;
use std::collections::HashMap;

pub mod error;
pub mod render;

pub use error::InvalidArgumentError;

use crate::render::Renderer;

/// Maps a query's source identifiers to the physical table names they were
/// resolved to for this compile request.
pub type TableMap = HashMap<String, String>;

/// Renders `query` into SQL. `main_table` is the already-resolved FROM
/// table; every other table reference resolves through `tables`.
pub fn compile(
    query: &QueryOption,
    tables: &TableMap,
    main_table: &str,
) -> Result<String, InvalidArgumentError> {
    if tables.is_empty() {
        return Err(InvalidArgumentError::EmptyTableMap);
    }
    if main_table.trim().is_empty() {
        return Err(InvalidArgumentError::BlankMainTable);
    }

    let mut r = Renderer::new(tables);
    render::select::render_query(query, main_table, &mut r);
    Ok(r.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_table_map() {
        let query = QueryOption::default();
        assert_eq!(
            compile(&query, &TableMap::new(), "orders"),
            Err(InvalidArgumentError::EmptyTableMap)
        );
    }

    #[test]
    fn rejects_blank_main_table() {
        let query = QueryOption::default();
        let tables = TableMap::from([("src-1".to_string(), "orders".to_string())]);
        assert_eq!(
            compile(&query, &tables, "  "),
            Err(InvalidArgumentError::BlankMainTable)
        );
    }

    #[test]
    fn bare_query_compiles_to_select_star() {
        let query = QueryOption::default();
        let tables = TableMap::from([("src-1".to_string(), "orders".to_string())]);
        assert_eq!(
            compile(&query, &tables, "orders").unwrap(),
            "SELECT * FROM orders"
        );
    }
}
