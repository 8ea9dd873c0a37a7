use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for domain, service, and storage layers.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("Book not loaded")]
    BookNotLoaded,
    #[error("Book not found: {0}")]
    BookNotFound(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Payee not found: {0}")]
    PayeeNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
    #[error("Subscription not found: {0}")]
    SubscriptionNotFound(String),
    #[error("Occurrence not found: {0}")]
    OccurrenceNotFound(Uuid),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(Uuid),
    #[error("Duplicate name: {0}")]
    DuplicateName(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, FinanceError>;

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        FinanceError::Storage(err.to_string())
    }
}
