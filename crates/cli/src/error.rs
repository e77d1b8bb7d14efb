use engine_runtime::error::ExecutionError;
use model::error::InvalidQueryError;
use query_builder::InvalidArgumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid query configuration: {0}")]
    InvalidQuery(#[from] InvalidQueryError),

    #[error("compile error: {0}")]
    Compile(#[from] InvalidArgumentError),

    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),
}
