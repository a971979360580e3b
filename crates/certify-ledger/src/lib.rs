//! Ledger client for Certify.
//!
//! This crate is the sole boundary to the external append-only ledger. It
//! defines the [`LedgerClient`] capability, its wire types, and three
//! implementations:
//!
//! - [`HttpLedgerClient`] — network-backed, signs submissions, imposes the
//!   configured request timeout
//! - [`StubLedger`] — deterministic in-memory ledger for tests and
//!   ledger-less environments
//! - [`FailoverLedger`] — the degraded-mode composition: a primary client
//!   that falls back to a stub when the network is unavailable
//!
//! Which implementation a deployment gets is decided once, at composition
//! time, through [`client_from_config`] — the engine services above this
//! crate carry no environment-sensitive branches.

pub mod config;
pub mod entry;
pub mod error;
pub mod failover;
pub mod remote;
pub mod stub;
pub mod traits;

use std::sync::Arc;

use certify_types::AccountAddress;

pub use config::{ConfigError, DeploymentMode, LedgerConfig};
pub use entry::{AnchorReceipt, AnchorSubmission, AnchoredEntry, LedgerAnswer};
pub use error::LedgerError;
pub use failover::FailoverLedger;
pub use remote::HttpLedgerClient;
pub use stub::StubLedger;
pub use traits::LedgerClient;

/// Build the ledger client a deployment should use.
///
/// Production gets the bare network client: ledger failures propagate.
/// Development wraps it in [`FailoverLedger`] so issuance and verification
/// keep working without ledger connectivity. Fallback anchors are
/// attributed to the configured signing credential's address (or the zero
/// address when running read-only).
pub fn client_from_config(config: &LedgerConfig) -> Result<Arc<dyn LedgerClient>, ConfigError> {
    let remote = HttpLedgerClient::new(config)?;
    Ok(match config.mode {
        DeploymentMode::Production => Arc::new(remote),
        DeploymentMode::Development => {
            let issuer = config
                .signing_key
                .as_ref()
                .map(|key| key.account_address())
                .unwrap_or_else(|| AccountAddress::from_raw([0; 20]));
            Arc::new(FailoverLedger::new(remote, StubLedger::new(issuer)))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_follows_deployment_mode() {
        let dev = LedgerConfig::from_lookup(|_| None).unwrap();
        assert!(client_from_config(&dev).is_ok());

        let prod = LedgerConfig::from_lookup(|var| match var {
            "CERTIFY_DEPLOYMENT" => Some("production".into()),
            "CERTIFY_LEDGER_ENDPOINT" => Some("https://ledger.example.org".into()),
            "CERTIFY_CONTRACT_ADDRESS" => {
                Some(AccountAddress::from_raw([1; 20]).to_hex())
            }
            _ => None,
        })
        .unwrap();
        assert!(client_from_config(&prod).is_ok());
    }
}
