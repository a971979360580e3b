use chrono::{DateTime, Utc};
use serde::Serialize;

use certify_types::temporal::{expiry_epoch, to_epoch_secs};
use certify_types::{CertificateRecord, Fingerprint};

use crate::hasher::{ContentHasher, HasherError};

/// The canonical encoding of a certificate's semantic fields.
///
/// A certificate's fingerprint is the digest of exactly these six fields,
/// serialized as JSON in the declaration order below. Struct serialization
/// fixes the key order, so no reordering can change the digest; dates are
/// carried as epoch seconds with `0` as the missing-expiry sentinel. The
/// encoding is versioned through the `certify-content-v1` hash domain —
/// any change to the field set or ordering requires a new domain tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CanonicalContent {
    recipient_name: String,
    title: String,
    description: String,
    issuer_name: String,
    issue_epoch: u64,
    expiry_epoch: u64,
}

impl CanonicalContent {
    /// Build canonical content from the semantic fields.
    pub fn new(
        recipient_name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        issuer_name: impl Into<String>,
        issue_date: &DateTime<Utc>,
        expiry_date: Option<&DateTime<Utc>>,
    ) -> Self {
        Self {
            recipient_name: recipient_name.into(),
            title: title.into(),
            description: description.into(),
            issuer_name: issuer_name.into(),
            issue_epoch: to_epoch_secs(issue_date),
            expiry_epoch: expiry_epoch(expiry_date),
        }
    }

    /// Canonical content of a persisted record, for re-verification.
    pub fn from_record(record: &CertificateRecord) -> Self {
        Self::new(
            record.recipient_name.clone(),
            record.title.clone(),
            record.description.clone(),
            record.issuer_name.clone(),
            &record.issue_date,
            record.expiry_date.as_ref(),
        )
    }

    /// Issue epoch seconds as carried in the encoding.
    pub fn issue_epoch(&self) -> u64 {
        self.issue_epoch
    }

    /// Expiry epoch seconds (0 = no expiry) as carried in the encoding.
    pub fn expiry_epoch(&self) -> u64 {
        self.expiry_epoch
    }

    /// Compute the fingerprint: domain-separated BLAKE3 over the canonical
    /// JSON bytes.
    pub fn fingerprint(&self) -> Result<Fingerprint, HasherError> {
        ContentHasher::CONTENT.hash_json(self)
    }
}
