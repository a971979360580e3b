/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The ledger network could not be reached, or the request timed out.
    /// Transient: the caller may retry, or a degraded-mode composition may
    /// absorb it.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// The ledger node refused the transaction (malformed payload or
    /// insufficient signing authority). Permanent; not retried.
    #[error("ledger rejected submission: {0}")]
    Rejected(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
