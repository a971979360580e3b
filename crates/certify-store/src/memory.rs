use std::collections::HashMap;
use std::sync::RwLock;

use certify_types::{AccountAddress, CertificateRecord, CertificateStatus, Fingerprint, RecordId};

use crate::error::{StoreError, StoreResult};
use crate::traits::RecordStore;

/// In-memory record store for tests, demos, and embedding.
///
/// Records live in an insertion-ordered vector behind a `RwLock`, with an
/// id index for point lookups. Insertion order doubles as creation order,
/// which defines the result order of the search operations.
pub struct InMemoryRecordStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    records: Vec<CertificateRecord>,
    by_id: HashMap<RecordId, usize>,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreState::default()),
        }
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().expect("lock poisoned").records.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().expect("lock poisoned").records.is_empty()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn create(&self, record: &CertificateRecord) -> StoreResult<()> {
        let mut state = self.inner.write().expect("lock poisoned");
        if state.by_id.contains_key(&record.id) {
            return Err(StoreError::DuplicateRecord(record.id));
        }
        state.records.push(record.clone());
        let index = state.records.len() - 1;
        state.by_id.insert(record.id, index);
        Ok(())
    }

    fn find_by_id(&self, id: &RecordId) -> StoreResult<Option<CertificateRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .by_id
            .get(id)
            .and_then(|&index| state.records.get(index))
            .cloned())
    }

    fn find_by_fingerprint(
        &self,
        fingerprint: &Fingerprint,
    ) -> StoreResult<Option<CertificateRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .records
            .iter()
            .find(|r| r.fingerprint == *fingerprint)
            .cloned())
    }

    fn find_by_name_substring(&self, query: &str) -> StoreResult<Vec<CertificateRecord>> {
        let needle = query.to_lowercase();
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .records
            .iter()
            .filter(|r| r.recipient_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn find_by_issuer(&self, issuer: &AccountAddress) -> StoreResult<Vec<CertificateRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .records
            .iter()
            .filter(|r| r.issuer_address == *issuer)
            .cloned()
            .collect())
    }

    fn update_status(
        &self,
        id: &RecordId,
        status: CertificateStatus,
    ) -> StoreResult<CertificateRecord> {
        let mut state = self.inner.write().expect("lock poisoned");
        let index = *state
            .by_id
            .get(id)
            .ok_or(StoreError::RecordNotFound(*id))?;
        let record = &mut state.records[index];
        record.status = status;
        Ok(record.clone())
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.len())
            .finish()
    }
}
