use serde::{Deserialize, Serialize};

use certify_types::{AccountAddress, AnchorBackend, Fingerprint, TransactionId};

/// The payload written to the ledger when anchoring a fingerprint.
///
/// Carries the fingerprint plus the minimal metadata the ledger entry
/// exposes to verifiers. Dates travel as epoch seconds; a missing expiry is
/// the sentinel `0`. The submitting account is not part of the payload —
/// the ledger attributes the entry to the signing credential that submitted
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSubmission {
    pub fingerprint: Fingerprint,
    pub recipient_name: String,
    pub issuer_name: String,
    pub issue_epoch: u64,
    pub expiry_epoch: u64,
}

/// Confirmation returned once a submission has been committed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorReceipt {
    pub transaction_id: TransactionId,
    pub block_ref: u64,
    /// Which backend produced the receipt. `Simulated` receipts come from
    /// the degraded-mode fallback and are carried into the persisted record.
    pub backend: AnchorBackend,
}

/// The authoritative anchor state the ledger reports for a fingerprint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchoredEntry {
    pub fingerprint: Fingerprint,
    pub issuer_address: AccountAddress,
    pub recipient_name: String,
    pub issue_epoch: u64,
    pub expiry_epoch: u64,
    pub block_ref: u64,
}

/// Answer to a fingerprint query.
///
/// `NotAnchored` is a successful negative answer, not an error: the ledger
/// was reached and has no entry for the fingerprint. `Unverifiable` is
/// produced only by the degraded-mode composition when the network is down
/// and the local fallback has no entry either — a network-backed client
/// never returns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerAnswer {
    Anchored(AnchoredEntry),
    NotAnchored,
    Unverifiable { reason: String },
}

impl LedgerAnswer {
    /// Returns `true` if the ledger confirmed an anchor for the fingerprint.
    pub fn is_anchored(&self) -> bool {
        matches!(self, Self::Anchored(_))
    }

    /// The anchored entry, if the answer carries one.
    pub fn entry(&self) -> Option<&AnchoredEntry> {
        match self {
            Self::Anchored(entry) => Some(entry),
            _ => None,
        }
    }
}
