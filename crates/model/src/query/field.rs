use serde::{Deserialize, Serialize};

/// A projected column: where it comes from, how it renders, and an optional
/// aggregate wrapped around it. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Field {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub field_name: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub field_mapping: Option<String>,
    #[serde(default)]
    pub field_type: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub table_alias: Option<String>,
    #[serde(default)]
    pub function: Option<AggregateFunction>,
    #[serde(default)]
    pub prefix: Option<String>,
}

impl Field {
    pub fn new(source_id: impl Into<String>, field_mapping: impl Into<String>) -> Self {
        Self {
            source_id: Some(source_id.into()),
            field_mapping: Some(field_mapping.into()),
            ..Self::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_function(mut self, function: AggregateFunction) -> Self {
        self.function = Some(function);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// The best available column name, in wire-shape precedence order.
    pub fn column_name(&self) -> &str {
        self.field_mapping
            .as_deref()
            .or(self.field_name.as_deref())
            .or(self.field.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateFunction {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }

    /// Lowercase name, used for default aggregation aliases.
    pub fn lower(&self) -> &'static str {
        match self {
            AggregateFunction::Sum => "sum",
            AggregateFunction::Avg => "avg",
            AggregateFunction::Count => "count",
            AggregateFunction::Min => "min",
            AggregateFunction::Max => "max",
        }
    }
}
