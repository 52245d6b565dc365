use thiserror::Error;

use crate::records::RecordId;

/// Error type that captures common record and reporting failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("Invalid expense: {0}")]
    Validation(String),
    #[error("Unknown report period: {0}")]
    InvalidPeriod(String),
    #[error("Expense not found: {0}")]
    NotFound(RecordId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
