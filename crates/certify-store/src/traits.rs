use certify_types::{AccountAddress, CertificateRecord, CertificateStatus, Fingerprint, RecordId};

use crate::error::StoreResult;

/// Persistence boundary for certificate records.
///
/// All implementations must satisfy these invariants:
/// - Records are append-only: `create` never overwrites, and nothing is
///   ever deleted. Only the `status` field changes after creation.
/// - Fingerprint uniqueness is NOT enforced: re-issuing structurally
///   identical content produces a second record with its own id and
///   transaction. `find_by_fingerprint` resolves to the earliest-created
///   record.
/// - Listing operations return records in creation order.
pub trait RecordStore: Send + Sync {
    /// Persist a new record.
    ///
    /// Fails with `StoreError::DuplicateRecord` if the id already exists.
    fn create(&self, record: &CertificateRecord) -> StoreResult<()>;

    /// Fetch a record by its store-assigned id.
    fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<CertificateRecord>>;

    /// Fetch the earliest-created record carrying the fingerprint.
    fn find_by_fingerprint(&self, fingerprint: &Fingerprint)
        -> StoreResult<Option<CertificateRecord>>;

    /// Case-insensitive substring search over recipient names, in creation
    /// order. Best-effort by contract: callers needing precision should
    /// look up by id or fingerprint.
    fn find_by_name_substring(&self, query: &str) -> StoreResult<Vec<CertificateRecord>>;

    /// All records issued by the given ledger account, in creation order.
    fn find_by_issuer(&self, issuer: &AccountAddress) -> StoreResult<Vec<CertificateRecord>>;

    /// Overwrite a record's lifecycle status and return the updated record.
    ///
    /// A plain CRUD primitive: transition legality is the caller's
    /// responsibility (`CertificateStatus::can_transition_to`).
    fn update_status(
        &self,
        id: &RecordId,
        status: CertificateStatus,
    ) -> StoreResult<CertificateRecord>;
}
