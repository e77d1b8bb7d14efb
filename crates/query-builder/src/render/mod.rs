pub mod filter;
pub mod select;
pub mod value;

use crate::TableMap;
use model::query::field::Field;

/// Accumulates SQL text for one compile request.
pub struct Renderer<'a> {
    pub sql: String,
    tables: &'a TableMap,
}

impl<'a> Renderer<'a> {
    pub fn new(tables: &'a TableMap) -> Self {
        Self {
            sql: String::new(),
            tables,
        }
    }

    /// Resolves a source identifier to its physical table name. Fields are
    /// never resolved by table name directly.
    pub fn resolve(&self, source_id: &str) -> Option<&str> {
        self.tables.get(source_id).map(String::as_str)
    }

    /// Renders `<table>.<column>` for a field, or the bare column when the
    /// field's source does not resolve.
    pub fn qualify(&self, field: &Field) -> String {
        let column = field.column_name();
        match field.source_id.as_deref().and_then(|id| self.resolve(id)) {
            Some(table) => format!("{table}.{column}"),
            None => column.to_string(),
        }
    }

    pub fn finish(self) -> String {
        self.sql
    }
}
