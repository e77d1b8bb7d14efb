use thiserror::Error;

/// Caller-side contract violations. Unlike malformed optional query
/// sections, which degrade to clause omission, these indicate the compiler
/// was invoked without its required inputs and are allowed to surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidArgumentError {
    #[error("table resolution map is empty")]
    EmptyTableMap,

    #[error("main table name is blank")]
    BlankMainTable,
}
