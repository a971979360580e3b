use std::sync::Arc;

use certify_engine::{AnchorService, VerificationResolver};
use certify_ledger::LedgerClient;
use certify_store::RecordStore;

use crate::auth::AuthProvider;

/// Shared request state: the engine services plus the identity collaborator.
///
/// Built once at startup from the composed ledger client and store; cheap to
/// clone per request.
#[derive(Clone)]
pub struct AppState {
    pub anchor: Arc<AnchorService>,
    pub resolver: Arc<VerificationResolver>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// Compose the engine services over the given capabilities.
    pub fn compose(
        ledger: Arc<dyn LedgerClient>,
        store: Arc<dyn RecordStore>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            anchor: Arc::new(AnchorService::new(ledger.clone(), store.clone())),
            resolver: Arc::new(VerificationResolver::new(ledger, store)),
            auth,
        }
    }
}
