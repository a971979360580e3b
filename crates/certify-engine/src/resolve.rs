use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use certify_ledger::{AnchoredEntry, LedgerAnswer, LedgerClient};
use certify_store::RecordStore;
use certify_types::{CertificateRecord, CertificateStatus, Fingerprint, RecordId};

use crate::error::EngineError;

/// Lookup criteria for verification — exactly one identifier kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupCriteria {
    /// Store identifier; at most one result by construction.
    RecordId(RecordId),
    /// Content fingerprint; unique up to re-issuance of identical content.
    Fingerprint(Fingerprint),
    /// Case-insensitive substring over recipient names. Best-effort: may
    /// under- or over-match, and resolves to the first match in creation
    /// order.
    RecipientName(String),
}

impl LookupCriteria {
    /// The confidence tier of this lookup mode.
    pub fn confidence(&self) -> LookupConfidence {
        match self {
            Self::RecordId(_) | Self::Fingerprint(_) => LookupConfidence::Exact,
            Self::RecipientName(_) => LookupConfidence::Fuzzy,
        }
    }
}

/// How precisely the lookup identified its record.
///
/// Fuzzy lookups (recipient name) are never promoted to the trust level of
/// identifier or fingerprint lookups: multiple recipients can share a name,
/// and the verdict says so.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupConfidence {
    Exact,
    Fuzzy,
}

/// Why a record failed reconciliation against the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchReason {
    /// The ledger has no anchor for the record's fingerprint.
    NotAnchored,
    /// The ledger attributes the anchor to a different issuer account.
    IssuerMismatch,
    /// The ledger's recorded recipient diverges from the stored record.
    RecipientMismatch,
}

/// The reconciled outcome of a verification request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// No stored record matched the criteria. A reportable negative result,
    /// not a failure.
    NotFound,
    /// The stored record does not match ledger truth, whatever its local
    /// status field claims.
    Invalid(MismatchReason),
    /// The ledger confirmed the anchor; the carried status is the record's
    /// lifecycle status with expiry re-derived at resolution time.
    Verified(CertificateStatus),
    /// Degraded mode only: the ledger was unreachable and the local
    /// fallback could not answer either. For demonstration purposes, not a
    /// confirmation.
    AssumedValid,
}

/// Outcome of a verification request: the resolved record (if any), the
/// ledger's view, and the reconciled status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub record: Option<CertificateRecord>,
    pub ledger_entry: Option<AnchoredEntry>,
    pub status: VerdictStatus,
    pub confidence: LookupConfidence,
}

impl Verdict {
    /// Returns `true` if a stored record matched the criteria.
    pub fn found(&self) -> bool {
        self.record.is_some()
    }
}

/// Verification orchestrator.
///
/// Looks up a stored record by one of several identifier kinds, re-queries
/// the ledger for the authoritative anchor, and reconciles the two into a
/// verdict. Read-only and idempotent; may run with unbounded concurrency.
pub struct VerificationResolver {
    ledger: Arc<dyn LedgerClient>,
    store: Arc<dyn RecordStore>,
}

impl VerificationResolver {
    pub fn new(ledger: Arc<dyn LedgerClient>, store: Arc<dyn RecordStore>) -> Self {
        Self { ledger, store }
    }

    /// Resolve the criteria to a trust verdict.
    ///
    /// # Errors
    ///
    /// `VerificationUnavailable` when the ledger cannot be queried (and no
    /// degraded-mode composition absorbed the failure). A missing record is
    /// a `NotFound` verdict, never an error.
    pub async fn resolve(&self, criteria: &LookupCriteria) -> Result<Verdict, EngineError> {
        let confidence = criteria.confidence();

        let record = match criteria {
            LookupCriteria::RecordId(id) => self.store.find_by_id(id)?,
            LookupCriteria::Fingerprint(fingerprint) => {
                self.store.find_by_fingerprint(fingerprint)?
            }
            LookupCriteria::RecipientName(query) => self
                .store
                .find_by_name_substring(query)?
                .into_iter()
                .next(),
        };

        let Some(record) = record else {
            return Ok(Verdict {
                record: None,
                ledger_entry: None,
                status: VerdictStatus::NotFound,
                confidence,
            });
        };

        let answer = self
            .ledger
            .query(&record.fingerprint)
            .await
            .map_err(EngineError::VerificationUnavailable)?;

        let status = reconcile(&record, &answer, Utc::now());
        if let VerdictStatus::Invalid(reason) = status {
            tracing::warn!(
                record = %record.id,
                fingerprint = %record.fingerprint,
                ?reason,
                "stored record does not match ledger state"
            );
        }

        Ok(Verdict {
            ledger_entry: answer.entry().cloned(),
            record: Some(record),
            status,
            confidence,
        })
    }
}

/// Reconcile a stored record with the ledger's answer for its fingerprint.
///
/// Pure: time is a parameter so expiry re-derivation is testable. The
/// ledger wins every disagreement — a record whose fingerprint is not
/// anchored, or whose issuer/recipient diverge from the anchored entry, is
/// `Invalid` no matter what its stored status says.
fn reconcile(
    record: &CertificateRecord,
    answer: &LedgerAnswer,
    now: DateTime<Utc>,
) -> VerdictStatus {
    match answer {
        LedgerAnswer::NotAnchored => VerdictStatus::Invalid(MismatchReason::NotAnchored),
        LedgerAnswer::Unverifiable { .. } => VerdictStatus::AssumedValid,
        LedgerAnswer::Anchored(entry) => {
            if entry.issuer_address != record.issuer_address {
                VerdictStatus::Invalid(MismatchReason::IssuerMismatch)
            } else if entry.recipient_name != record.recipient_name {
                VerdictStatus::Invalid(MismatchReason::RecipientMismatch)
            } else {
                VerdictStatus::Verified(record.effective_status(now))
            }
        }
    }
}
