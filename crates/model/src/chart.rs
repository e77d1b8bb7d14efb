//! Chart-level query configuration: the saved description a chart's
//! recurring refresh compiles from.

use crate::query::{QueryOption, join::JoinSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    Basic,
    Advanced,
}

/// A table a basic query draws from, with the alias joins refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub alias: String,
    #[serde(default)]
    pub source_id: Option<String>,
}

/// The structured, UI-authored query path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BasicQueryConfig {
    #[serde(default)]
    pub tables: Vec<TableConfig>,
    #[serde(default)]
    pub joins: Vec<JoinSpec>,
    #[serde(default)]
    pub query: QueryOption,
}

/// The hand-written SQL path; bypasses the compiler entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedQueryConfig {
    pub sql: String,
}

/// A chart's saved query. Exactly one of `basic`/`advanced` is populated,
/// consistent with `query_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartQueryConfig {
    pub query_type: QueryType,
    #[serde(default)]
    pub basic: Option<BasicQueryConfig>,
    #[serde(default)]
    pub advanced: Option<AdvancedQueryConfig>,
}
