use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use certify_types::{AccountAddress, AnchorBackend, Fingerprint, TransactionId};

use crate::entry::{AnchorReceipt, AnchorSubmission, AnchoredEntry, LedgerAnswer};
use crate::error::LedgerError;
use crate::traits::LedgerClient;

/// Deterministic in-memory ledger for tests and ledger-less environments.
///
/// Anchors are held in a map keyed by fingerprint. Submissions return a
/// pseudo-random transaction id and a monotonically increasing block
/// reference; receipts are marked `Simulated` so the records built from
/// them stay distinguishable from network-anchored ones. Entries are
/// attributed to the issuer address the stub was constructed with — the
/// address of the deployment's signing credential, mirroring how a real
/// ledger attributes entries to the submitting account.
pub struct StubLedger {
    issuer: AccountAddress,
    inner: RwLock<StubState>,
}

#[derive(Default)]
struct StubState {
    anchors: HashMap<Fingerprint, AnchoredEntry>,
    next_block: u64,
}

impl StubLedger {
    /// Create a stub attributing anchors to the given issuer address.
    pub fn new(issuer: AccountAddress) -> Self {
        Self {
            issuer,
            inner: RwLock::new(StubState::default()),
        }
    }

    /// Number of anchored fingerprints.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").anchors.len()
    }

    /// Returns `true` if nothing has been anchored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").anchors.is_empty()
    }

    /// Returns `true` if the fingerprint has been anchored on this stub.
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.inner
            .read()
            .expect("lock poisoned")
            .anchors
            .contains_key(fingerprint)
    }
}

#[async_trait]
impl LedgerClient for StubLedger {
    async fn submit(&self, submission: &AnchorSubmission) -> Result<AnchorReceipt, LedgerError> {
        let mut state = self.inner.write().expect("lock poisoned");
        state.next_block += 1;
        let block_ref = state.next_block;

        let entry = AnchoredEntry {
            fingerprint: submission.fingerprint,
            issuer_address: self.issuer,
            recipient_name: submission.recipient_name.clone(),
            issue_epoch: submission.issue_epoch,
            expiry_epoch: submission.expiry_epoch,
            block_ref,
        };
        // Duplicate submissions each get their own transaction, matching a
        // real ledger: the map keeps the latest entry for the fingerprint.
        state.anchors.insert(submission.fingerprint, entry);

        Ok(AnchorReceipt {
            transaction_id: TransactionId::random(),
            block_ref,
            backend: AnchorBackend::Simulated,
        })
    }

    async fn query(&self, fingerprint: &Fingerprint) -> Result<LedgerAnswer, LedgerError> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(match state.anchors.get(fingerprint) {
            Some(entry) => LedgerAnswer::Anchored(entry.clone()),
            None => LedgerAnswer::NotAnchored,
        })
    }
}
