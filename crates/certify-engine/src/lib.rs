//! Core engine for Certify: certificate anchoring and verification.
//!
//! Two services live here, composed from the [`certify_ledger::LedgerClient`]
//! and [`certify_store::RecordStore`] capabilities:
//!
//! - [`AnchorService`] — issuance: validate the draft, fingerprint the
//!   content, anchor it on the ledger, persist the record. Atomic from the
//!   caller's perspective.
//! - [`VerificationResolver`] — verification: look up a stored record,
//!   re-query the ledger, reconcile the two into a [`Verdict`].
//!
//! Neither service branches on deployment mode; degraded-mode behavior is a
//! property of the ledger client composed in at startup.

pub mod anchor;
pub mod error;
pub mod resolve;

pub use anchor::AnchorService;
pub use error::EngineError;
pub use resolve::{
    LookupConfidence, LookupCriteria, MismatchReason, Verdict, VerdictStatus,
    VerificationResolver,
};
