use certify_ledger::LedgerError;
use certify_store::StoreError;
use certify_types::CertificateStatus;
use thiserror::Error;

/// Errors produced by the issuance and verification services.
///
/// Negative verification results (`NotFound`, `Invalid`) are verdict values,
/// not errors — this enum covers client input faults, infrastructure
/// failures, and illegal lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Client input error: missing or empty required fields, or an expiry
    /// date that is not after the issue date. Not retried.
    #[error("invalid certificate data: {0}")]
    InvalidCertificateData(String),

    /// Ledger submission failed and no fallback absorbed it; nothing was
    /// persisted.
    #[error("issuance failed: {0}")]
    IssuanceFailed(LedgerError),

    /// The ledger could not be queried during verification.
    #[error("verification unavailable: {0}")]
    VerificationUnavailable(LedgerError),

    /// Attempted an illegal lifecycle transition.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: CertificateStatus,
        to: CertificateStatus,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}
