use serde::{Deserialize, Serialize};

use certify_engine::{LookupConfidence, Verdict, VerdictStatus};
use certify_ledger::AnchoredEntry;
use certify_types::{CertificateRecord, TransactionId};

/// Response to a successful issuance.
#[derive(Debug, Serialize, Deserialize)]
pub struct IssueResponse {
    pub record: CertificateRecord,
    pub transaction_id: TransactionId,
}

impl From<CertificateRecord> for IssueResponse {
    fn from(record: CertificateRecord) -> Self {
        Self {
            transaction_id: record.transaction_id,
            record,
        }
    }
}

/// Response to a verification request. `found: false` with status
/// `not_found` is a successful negative answer, served with HTTP 200.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub found: bool,
    pub status: VerdictStatus,
    pub confidence: LookupConfidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<CertificateRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_entry: Option<AnchoredEntry>,
}

impl From<Verdict> for VerifyResponse {
    fn from(verdict: Verdict) -> Self {
        Self {
            found: verdict.found(),
            status: verdict.status,
            confidence: verdict.confidence,
            record: verdict.record,
            ledger_entry: verdict.ledger_entry,
        }
    }
}

/// Response to the issued-by listing.
#[derive(Debug, Serialize)]
pub struct IssuedResponse {
    pub certificates: Vec<CertificateRecord>,
}

/// Health check payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}
