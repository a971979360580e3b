use async_trait::async_trait;

use certify_types::Fingerprint;

use crate::entry::{AnchorReceipt, AnchorSubmission, LedgerAnswer};
use crate::error::LedgerError;
use crate::stub::StubLedger;
use crate::traits::LedgerClient;

/// Degraded-mode composition: a primary client backed by a local stub.
///
/// Composed only in non-production deployments. Requests go to the primary;
/// only `LedgerError::Unavailable` triggers the fallback — rejections and
/// every other failure propagate unchanged, so the two modes are never
/// silently mixed:
///
/// - `submit` falls back to the stub, whose receipt is marked `Simulated`
///   and is carried into the persisted record.
/// - `query` answers from the stub's own anchors; when the stub has no
///   entry for the fingerprint either, the answer is `Unverifiable` rather
///   than an error, which the resolver reports as an assumed-valid verdict.
pub struct FailoverLedger<P> {
    primary: P,
    fallback: StubLedger,
}

impl<P: LedgerClient> FailoverLedger<P> {
    /// Wrap a primary client with a stub fallback.
    pub fn new(primary: P, fallback: StubLedger) -> Self {
        Self { primary, fallback }
    }

    /// The stub holding locally simulated anchors.
    pub fn fallback(&self) -> &StubLedger {
        &self.fallback
    }
}

#[async_trait]
impl<P: LedgerClient> LedgerClient for FailoverLedger<P> {
    async fn submit(&self, submission: &AnchorSubmission) -> Result<AnchorReceipt, LedgerError> {
        match self.primary.submit(submission).await {
            Ok(receipt) => Ok(receipt),
            Err(LedgerError::Unavailable(reason)) => {
                tracing::warn!(
                    fingerprint = %submission.fingerprint,
                    %reason,
                    "ledger unavailable; anchoring on the local fallback"
                );
                self.fallback.submit(submission).await
            }
            Err(other) => Err(other),
        }
    }

    async fn query(&self, fingerprint: &Fingerprint) -> Result<LedgerAnswer, LedgerError> {
        match self.primary.query(fingerprint).await {
            Ok(answer) => Ok(answer),
            Err(LedgerError::Unavailable(reason)) => {
                tracing::warn!(%fingerprint, %reason, "ledger unavailable; answering from the local fallback");
                match self.fallback.query(fingerprint).await? {
                    LedgerAnswer::NotAnchored => Ok(LedgerAnswer::Unverifiable { reason }),
                    answer => Ok(answer),
                }
            }
            Err(other) => Err(other),
        }
    }
}
