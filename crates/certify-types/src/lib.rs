//! Foundation types for Certify.
//!
//! This crate provides the identity, temporal, and record types used
//! throughout the certificate anchoring engine. Every other Certify crate
//! depends on `certify-types`.
//!
//! # Key Types
//!
//! - [`Fingerprint`] — Content-addressed identity of a certificate (BLAKE3)
//! - [`TransactionId`] — Ledger anchoring transaction identifier
//! - [`AccountAddress`] — Issuer account identifier on the ledger
//! - [`RecordId`] — UUID v7 store identifier for a persisted record
//! - [`CertificateStatus`] — Lifecycle status with enforced transitions
//! - [`CertificateRecord`] — The persisted certificate entity

pub mod account;
pub mod error;
pub mod fingerprint;
pub mod record;
pub mod temporal;
pub mod transaction;

pub use account::AccountAddress;
pub use error::TypeError;
pub use fingerprint::Fingerprint;
pub use record::{AnchorBackend, CertificateDraft, CertificateRecord, CertificateStatus, RecordId};
pub use transaction::TransactionId;
