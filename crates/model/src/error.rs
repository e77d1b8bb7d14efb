use thiserror::Error;

/// Structural validation failures for user-authored query configurations.
///
/// These are data-quality errors: they come from the chart configuration a
/// user saved, never from a caller-side contract violation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidQueryError {
    #[error("no table configurations present")]
    NoTables,

    #[error("join target '{alias}' does not resolve to any configured table")]
    UnresolvedJoinTarget { alias: String },

    #[error("join has no target table or alias")]
    MissingJoinTarget,

    #[error("query type '{query_type}' requires its matching configuration to be populated")]
    MissingQueryConfig { query_type: &'static str },

    #[error("query type '{query_type}' must not carry a '{conflicting}' configuration")]
    ConflictingQueryConfig {
        query_type: &'static str,
        conflicting: &'static str,
    },
}
