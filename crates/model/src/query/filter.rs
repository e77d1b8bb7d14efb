//! The recursive WHERE structure: a tree of conditions and AND/OR groups.

use crate::query::field::Field;
use serde::{Deserialize, Serialize};

/// One node of a filter tree.
///
/// The tree is rooted, built fresh per compile request, and owned exclusively
/// by that request. Nodes are never shared across queries and never refer
/// back to an ancestor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterNode {
    Condition(Condition),
    Group(Group),
}

impl FilterNode {
    pub fn condition(field: Field, operator: CompareOp, value: serde_json::Value) -> Self {
        FilterNode::Condition(Condition {
            id: None,
            operator,
            value,
            source_field: field,
            target_field: None,
            compare_with_other_field: false,
        })
    }

    pub fn group(op: GroupOp, elements: Vec<FilterNode>) -> Self {
        FilterNode::Group(Group {
            id: None,
            op,
            elements,
        })
    }
}

/// A single comparison against a literal, a list, or another column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub id: Option<String>,
    pub operator: CompareOp,
    #[serde(default)]
    pub value: serde_json::Value,
    pub source_field: Field,
    #[serde(default)]
    pub target_field: Option<Field>,
    #[serde(default)]
    pub compare_with_other_field: bool,
}

/// An ordered boolean combination of child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: Option<String>,
    pub op: GroupOp,
    #[serde(default)]
    pub elements: Vec<FilterNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GroupOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Between,
    Like,
    IsNull,
    IsNotNull,
}
