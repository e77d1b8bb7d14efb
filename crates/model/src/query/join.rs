use crate::query::filter::CompareOp;
use serde::{Deserialize, Serialize};

/// A declarative join: the target table, how to combine it, and the matching
/// conditions. `table` carries the target's source identifier and resolves
/// through the same source-id map as field projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinSpec {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub table_alias: Option<String>,
    #[serde(rename = "type")]
    pub kind: JoinKind,
    #[serde(default)]
    pub conditions: Vec<JoinCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    #[serde(rename = "INNER")]
    Inner,
    #[serde(rename = "LEFT")]
    Left,
    #[serde(rename = "RIGHT")]
    Right,
    #[serde(rename = "CROSS")]
    Cross,
    #[serde(rename = "NATURAL LEFT")]
    NaturalLeft,
    #[serde(rename = "NATURAL RIGHT")]
    NaturalRight,
}

impl JoinKind {
    pub fn as_sql(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Cross => "CROSS",
            JoinKind::NaturalLeft => "NATURAL LEFT",
            JoinKind::NaturalRight => "NATURAL RIGHT",
        }
    }
}

/// One equality-style match between two columns. Operators outside the
/// EQ/GT/GTE/LT/LTE set are not renderable as join conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinCondition {
    pub left_table: String,
    pub left_field: String,
    pub right_table: String,
    pub right_field: String,
    pub operator: CompareOp,
}
