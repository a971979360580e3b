use certify_types::RecordId;
use thiserror::Error;

/// Errors produced by record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record already exists: {0}")]
    DuplicateRecord(RecordId),

    #[error("record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
