//! Cryptographic primitives for Certify.
//!
//! Two concerns live here:
//!
//! - [`CanonicalContent`] and [`ContentHasher`] — the deterministic
//!   fingerprinting pipeline. A certificate's fingerprint is the
//!   domain-separated BLAKE3 digest of its canonical content encoding, and
//!   that fingerprint is the identity anchored on the ledger.
//! - [`SigningKey`] / [`VerifyingKey`] — ed25519 keys used by the ledger
//!   client to sign anchoring submissions.

pub mod content;
pub mod hasher;
pub mod signer;

pub use content::CanonicalContent;
pub use hasher::{ContentHasher, HasherError};
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
