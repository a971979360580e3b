use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::AccountAddress;
use crate::fingerprint::Fingerprint;
use crate::transaction::TransactionId;

/// Store-assigned identifier for a persisted certificate record
/// (UUID v7 for time-ordering). Distinct from the content fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(uuid::Uuid);

impl RecordId {
    /// Generate a new time-ordered record ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from the canonical hyphenated form.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        uuid::Uuid::parse_str(s).map(Self)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.short_id())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a certificate record.
///
/// A record starts `Valid`. It can move to `Expired` (time-driven) or
/// `Revoked` (explicit action); both are terminal. The transition rules are
/// enforced through [`CertificateStatus::can_transition_to`] — callers that
/// mutate status must consult it first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Valid,
    Expired,
    Revoked,
}

impl CertificateStatus {
    /// Returns `true` for statuses that admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Revoked)
    }

    /// Whether the transition `self -> target` is legal.
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Valid, Self::Expired) | (Self::Valid, Self::Revoked)
        )
    }

    /// The lowercase identifier used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}

impl fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which ledger backend anchored a record.
///
/// `Simulated` marks records produced by the degraded-mode fallback: their
/// transaction id was generated locally and cannot be re-verified against
/// the real ledger. They are never reported with the same trust level as
/// network-anchored records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorBackend {
    /// Anchored on the real ledger network; independently re-verifiable.
    Network,
    /// Anchored by the local fallback; not re-verifiable against the network.
    Simulated,
}

impl fmt::Display for AnchorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Simulated => f.write_str("simulated"),
        }
    }
}

/// A persisted certificate record.
///
/// Constructed exclusively by the anchor service after ledger confirmation:
/// a record never exists without both its fingerprint and its anchoring
/// transaction id. `fingerprint` and `transaction_id` are immutable once
/// set; only `status` changes over a record's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: RecordId,
    pub recipient_name: String,
    pub recipient_email: String,
    pub title: String,
    pub description: String,
    pub issuer_name: String,
    pub issuer_address: AccountAddress,
    pub issue_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub fingerprint: Fingerprint,
    pub transaction_id: TransactionId,
    pub block_ref: u64,
    pub anchor: AnchorBackend,
    pub status: CertificateStatus,
}

impl CertificateRecord {
    /// Returns `true` if the record's expiry date has passed at `now`.
    pub fn has_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|exp| exp <= now)
    }

    /// The lifecycle status with expiry re-derived at `now`.
    ///
    /// The stored `status` field can lag behind the clock between expiry
    /// sweeps; every read-side consumer evaluates expiry itself instead of
    /// trusting the stored value.
    pub fn effective_status(&self, now: DateTime<Utc>) -> CertificateStatus {
        match self.status {
            CertificateStatus::Valid if self.has_expired_at(now) => CertificateStatus::Expired,
            other => other,
        }
    }
}

/// Client-supplied fields for a certificate to be issued.
///
/// Everything the anchor service derives (fingerprint, transaction id,
/// status, record id) is absent by construction. `issue_date` defaults to
/// the time of issuance when omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDraft {
    pub recipient_name: String,
    pub recipient_email: String,
    pub title: String,
    pub description: String,
    pub issuer_name: String,
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
}
