//! The typed representation of a UI-authored query. Shape plus validation
//! helpers only; rendering lives in the `query-builder` crate.

pub mod field;
pub mod filter;
pub mod join;
pub mod sort;

use crate::query::{field::Field, filter::FilterNode, join::JoinSpec, sort::Sort};
use serde::{Deserialize, Serialize};

/// A registered, ingested dataset that a query's tables resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourceRef {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub source_type: String,
}

/// 1-based page selection. Both parts are optional; a missing `size` omits
/// the LIMIT clause entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

/// Top-level query description consumed from the UI wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryOption {
    #[serde(default)]
    pub source: Option<SourceRef>,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub filters: Option<FilterNode>,
    #[serde(default)]
    pub sort: Vec<Sort>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub having: Vec<Field>,
    #[serde(default)]
    pub joins: Vec<JoinSpec>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}
