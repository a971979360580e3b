use async_trait::async_trait;

use certify_types::Fingerprint;

use crate::entry::{AnchorReceipt, AnchorSubmission, LedgerAnswer};
use crate::error::LedgerError;

/// The sole boundary to the external ledger network.
///
/// Implementations are selected at composition time: a network-backed
/// client for production, and a deterministic stub (alone or behind the
/// failover wrapper) for tests and ledger-less environments. The engine
/// services never branch on deployment mode themselves.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Anchor a fingerprint on the ledger.
    ///
    /// Suspends until the submission is confirmed (committed), not merely
    /// accepted into a queue. The write is irreversible; once submitted, a
    /// transaction cannot be withdrawn.
    ///
    /// # Errors
    ///
    /// `LedgerError::Unavailable` if the network cannot be reached or the
    /// request times out; `LedgerError::Rejected` if the node refuses the
    /// transaction.
    async fn submit(&self, submission: &AnchorSubmission) -> Result<AnchorReceipt, LedgerError>;

    /// Read-only lookup of the anchor state for a fingerprint.
    ///
    /// A fingerprint that was never anchored yields
    /// `Ok(LedgerAnswer::NotAnchored)`, not an error.
    ///
    /// # Errors
    ///
    /// `LedgerError::Unavailable` on network failure.
    async fn query(&self, fingerprint: &Fingerprint) -> Result<LedgerAnswer, LedgerError>;
}
