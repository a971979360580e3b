use std::sync::Arc;

use chrono::Utc;

use certify_crypto::CanonicalContent;
use certify_ledger::{AnchorSubmission, LedgerClient};
use certify_store::RecordStore;
use certify_types::temporal::truncate_to_seconds;
use certify_types::{
    AccountAddress, CertificateDraft, CertificateRecord, CertificateStatus, RecordId,
};

use crate::error::EngineError;

/// Issuance orchestrator.
///
/// Issuance is atomic from the caller's perspective: the record is persisted
/// only after the ledger confirms the anchoring submission, so either a
/// fully anchored record exists or nothing does. The service holds no
/// environment-sensitive branches — degraded-mode behavior lives entirely
/// in the ledger client it was composed with.
pub struct AnchorService {
    ledger: Arc<dyn LedgerClient>,
    store: Arc<dyn RecordStore>,
}

impl AnchorService {
    pub fn new(ledger: Arc<dyn LedgerClient>, store: Arc<dyn RecordStore>) -> Self {
        Self { ledger, store }
    }

    /// Issue a certificate on behalf of `issuer_address`.
    ///
    /// Validates the draft, computes the content fingerprint, anchors it on
    /// the ledger (suspending until confirmation), and persists the
    /// resulting record with `status = valid`.
    ///
    /// # Errors
    ///
    /// `InvalidCertificateData` before any side effect; `IssuanceFailed`
    /// when submission fails, in which case the store is untouched.
    pub async fn issue(
        &self,
        draft: CertificateDraft,
        issuer_address: AccountAddress,
    ) -> Result<CertificateRecord, EngineError> {
        validate_draft(&draft)?;

        let issue_date = truncate_to_seconds(draft.issue_date.unwrap_or_else(Utc::now));
        let expiry_date = draft.expiry_date.map(truncate_to_seconds);
        if let Some(expiry) = expiry_date {
            if expiry <= issue_date {
                return Err(EngineError::InvalidCertificateData(
                    "expiry date must be after the issue date".into(),
                ));
            }
        }

        let content = CanonicalContent::new(
            draft.recipient_name.clone(),
            draft.title.clone(),
            draft.description.clone(),
            draft.issuer_name.clone(),
            &issue_date,
            expiry_date.as_ref(),
        );
        let fingerprint = content
            .fingerprint()
            .map_err(|e| EngineError::Internal(e.to_string()))?;

        let submission = AnchorSubmission {
            fingerprint,
            recipient_name: draft.recipient_name.clone(),
            issuer_name: draft.issuer_name.clone(),
            issue_epoch: content.issue_epoch(),
            expiry_epoch: content.expiry_epoch(),
        };

        let receipt = self
            .ledger
            .submit(&submission)
            .await
            .map_err(EngineError::IssuanceFailed)?;

        let record = CertificateRecord {
            id: RecordId::new(),
            recipient_name: draft.recipient_name,
            recipient_email: draft.recipient_email,
            title: draft.title,
            description: draft.description,
            issuer_name: draft.issuer_name,
            issuer_address,
            issue_date,
            expiry_date,
            fingerprint,
            transaction_id: receipt.transaction_id,
            block_ref: receipt.block_ref,
            anchor: receipt.backend,
            status: CertificateStatus::Valid,
        };
        self.store.create(&record)?;

        tracing::info!(
            record = %record.id,
            fingerprint = %record.fingerprint,
            transaction = %record.transaction_id,
            backend = %record.anchor,
            "certificate issued"
        );
        Ok(record)
    }

    /// All certificates issued by the given ledger account, in creation
    /// order.
    pub fn issued_by(
        &self,
        issuer: &AccountAddress,
    ) -> Result<Vec<CertificateRecord>, EngineError> {
        Ok(self.store.find_by_issuer(issuer)?)
    }

    /// Revoke a certificate: the explicit `valid -> revoked` transition.
    ///
    /// Revocation is terminal; revoking an expired or already revoked
    /// record fails with `InvalidTransition`.
    pub fn revoke(&self, id: &RecordId) -> Result<CertificateRecord, EngineError> {
        let record = self
            .store
            .find_by_id(id)?
            .ok_or(certify_store::StoreError::RecordNotFound(*id))?;

        if !record
            .status
            .can_transition_to(CertificateStatus::Revoked)
        {
            return Err(EngineError::InvalidTransition {
                from: record.status,
                to: CertificateStatus::Revoked,
            });
        }

        let updated = self.store.update_status(id, CertificateStatus::Revoked)?;
        tracing::info!(record = %updated.id, "certificate revoked");
        Ok(updated)
    }
}

/// Reject drafts with missing or empty required fields before any side
/// effect.
fn validate_draft(draft: &CertificateDraft) -> Result<(), EngineError> {
    let required = [
        ("recipient_name", &draft.recipient_name),
        ("recipient_email", &draft.recipient_email),
        ("title", &draft.title),
        ("description", &draft.description),
        ("issuer_name", &draft.issuer_name),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(EngineError::InvalidCertificateData(format!(
                "{field} must not be empty"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use certify_ledger::{
        AnchorReceipt, FailoverLedger, LedgerAnswer, LedgerError, StubLedger,
    };
    use certify_store::InMemoryRecordStore;
    use certify_types::{AnchorBackend, Fingerprint};
    use chrono::{Duration, TimeZone};

    struct BrokenLedger(LedgerError);

    #[async_trait]
    impl LedgerClient for BrokenLedger {
        async fn submit(&self, _: &AnchorSubmission) -> Result<AnchorReceipt, LedgerError> {
            Err(self.0.clone())
        }
        async fn query(&self, _: &Fingerprint) -> Result<LedgerAnswer, LedgerError> {
            Err(self.0.clone())
        }
    }

    fn issuer() -> AccountAddress {
        AccountAddress::from_raw([9; 20])
    }

    fn draft() -> CertificateDraft {
        CertificateDraft {
            recipient_name: "Ada Lovelace".into(),
            recipient_email: "ada@example.org".into(),
            title: "Certificate X".into(),
            description: "Completed the analytical engine course".into(),
            issuer_name: "Analytical Society".into(),
            issue_date: Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()),
            expiry_date: None,
        }
    }

    fn service() -> (AnchorService, Arc<InMemoryRecordStore>) {
        let store = Arc::new(InMemoryRecordStore::new());
        let ledger = Arc::new(StubLedger::new(issuer()));
        (AnchorService::new(ledger, store.clone()), store)
    }

    fn service_with(ledger: Arc<dyn LedgerClient>) -> (AnchorService, Arc<InMemoryRecordStore>) {
        let store = Arc::new(InMemoryRecordStore::new());
        (AnchorService::new(ledger, store.clone()), store)
    }

    #[tokio::test]
    async fn issue_persists_an_anchored_record() {
        let (service, store) = service();
        let record = service.issue(draft(), issuer()).await.unwrap();

        assert_eq!(record.status, CertificateStatus::Valid);
        assert_eq!(record.issuer_address, issuer());
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(&record.id).unwrap(), Some(record));
    }

    #[tokio::test]
    async fn identical_content_produces_identical_fingerprints() {
        let (service, _) = service();
        let a = service.issue(draft(), issuer()).await.unwrap();
        let b = service.issue(draft(), issuer()).await.unwrap();

        assert_eq!(a.fingerprint, b.fingerprint);
        assert_ne!(a.id, b.id);
        assert_ne!(a.transaction_id, b.transaction_id);
    }

    #[tokio::test]
    async fn changed_content_changes_the_fingerprint() {
        let (service, _) = service();
        let a = service.issue(draft(), issuer()).await.unwrap();
        let mut other = draft();
        other.title = "Certificate Y".into();
        let b = service.issue(other, issuer()).await.unwrap();
        assert_ne!(a.fingerprint, b.fingerprint);
    }

    #[tokio::test]
    async fn empty_required_field_is_rejected_without_side_effects() {
        let (service, store) = service();
        let mut bad = draft();
        bad.recipient_name = "  ".into();

        let err = service.issue(bad, issuer()).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidCertificateData(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn expiry_not_after_issue_is_rejected() {
        let (service, store) = service();
        let mut bad = draft();
        bad.expiry_date = bad.issue_date;

        let err = service.issue(bad, issuer()).await.unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidCertificateData("expiry date must be after the issue date".into())
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn future_expiry_is_accepted() {
        let (service, _) = service();
        let mut d = draft();
        d.expiry_date = Some(d.issue_date.unwrap() + Duration::days(365));
        let record = service.issue(d, issuer()).await.unwrap();
        assert!(record.expiry_date.is_some());
    }

    #[tokio::test]
    async fn omitted_issue_date_defaults_to_now() {
        let (service, _) = service();
        let mut d = draft();
        d.issue_date = None;
        let before = Utc::now();
        let record = service.issue(d, issuer()).await.unwrap();
        assert!(record.issue_date >= truncate_to_seconds(before - Duration::seconds(1)));
        assert!(record.issue_date <= Utc::now());
    }

    #[tokio::test]
    async fn unavailable_ledger_fails_issuance_atomically() {
        // Production composition: the bare client, no fallback.
        let (service, store) = service_with(Arc::new(BrokenLedger(LedgerError::Unavailable(
            "connection refused".into(),
        ))));

        let err = service.issue(draft(), issuer()).await.unwrap_err();
        assert!(matches!(err, EngineError::IssuanceFailed(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn rejected_submission_fails_issuance() {
        let (service, store) = service_with(Arc::new(BrokenLedger(LedgerError::Rejected(
            "malformed payload".into(),
        ))));

        let err = service.issue(draft(), issuer()).await.unwrap_err();
        assert_eq!(
            err,
            EngineError::IssuanceFailed(LedgerError::Rejected("malformed payload".into()))
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failover_composition_marks_records_simulated() {
        let broken = BrokenLedger(LedgerError::Unavailable("network down".into()));
        let ledger = Arc::new(FailoverLedger::new(broken, StubLedger::new(issuer())));
        let (service, store) = service_with(ledger);

        let record = service.issue(draft(), issuer()).await.unwrap();
        assert_eq!(record.anchor, AnchorBackend::Simulated);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn network_anchored_records_are_marked_network() {
        struct ConfirmingLedger;
        #[async_trait]
        impl LedgerClient for ConfirmingLedger {
            async fn submit(&self, _: &AnchorSubmission) -> Result<AnchorReceipt, LedgerError> {
                Ok(AnchorReceipt {
                    transaction_id: certify_types::TransactionId::from_raw([7; 32]),
                    block_ref: 1234,
                    backend: AnchorBackend::Network,
                })
            }
            async fn query(&self, _: &Fingerprint) -> Result<LedgerAnswer, LedgerError> {
                Ok(LedgerAnswer::NotAnchored)
            }
        }

        let (service, _) = service_with(Arc::new(ConfirmingLedger));
        let record = service.issue(draft(), issuer()).await.unwrap();
        assert_eq!(record.anchor, AnchorBackend::Network);
        assert_eq!(record.block_ref, 1234);
    }

    #[tokio::test]
    async fn issued_by_lists_only_the_callers_records() {
        let (service, _) = service();
        service.issue(draft(), issuer()).await.unwrap();
        let other = AccountAddress::from_raw([5; 20]);
        let mut d = draft();
        d.title = "Certificate Y".into();
        service.issue(d, other).await.unwrap();

        assert_eq!(service.issued_by(&issuer()).unwrap().len(), 1);
        assert_eq!(service.issued_by(&other).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn revoke_is_terminal() {
        let (service, _) = service();
        let record = service.issue(draft(), issuer()).await.unwrap();

        let revoked = service.revoke(&record.id).unwrap();
        assert_eq!(revoked.status, CertificateStatus::Revoked);

        let err = service.revoke(&record.id).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidTransition {
                from: CertificateStatus::Revoked,
                to: CertificateStatus::Revoked,
            }
        );
    }

    #[tokio::test]
    async fn revoke_missing_record_fails() {
        let (service, _) = service();
        let id = RecordId::new();
        let err = service.revoke(&id).unwrap_err();
        assert_eq!(
            err,
            EngineError::Store(certify_store::StoreError::RecordNotFound(id))
        );
    }

    #[tokio::test]
    async fn issue_date_is_truncated_to_seconds() {
        let (service, _) = service();
        let mut d = draft();
        d.issue_date = Some(
            Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0)
                .unwrap()
                .checked_add_signed(Duration::milliseconds(750))
                .unwrap(),
        );
        let record = service.issue(d, issuer()).await.unwrap();
        assert_eq!(
            record.issue_date,
            Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
        );
    }
}
