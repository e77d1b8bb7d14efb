//! Row shape shared between the compiler's consumers and the storage boundary.

/// One result row, keyed by column name. Rows are produced by the storage
/// collaborator and written back verbatim into a chart's result table.
pub type Row = serde_json::Map<String, serde_json::Value>;
