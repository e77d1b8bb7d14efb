use std::time::Duration;
use thiserror::Error;

/// Failures at the storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing engine rejected the statement.
    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("unknown table '{0}'")]
    UnknownTable(String),

    /// Transient connectivity failure.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),
}

impl StorageError {
    /// Whether a retry of the same operation can reasonably succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Timeout(_))
    }
}
