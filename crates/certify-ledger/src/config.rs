use std::time::Duration;

use certify_crypto::SigningKey;
use certify_types::AccountAddress;

/// Whether the deployment is allowed to fall back to the simulated ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Ledger failures propagate to the caller. No fallback.
    Production,
    /// Ledger failures are absorbed by the local fallback so development
    /// workflows stay unblocked without ledger connectivity.
    Development,
}

impl DeploymentMode {
    /// Parse the `CERTIFY_DEPLOYMENT` value.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(ConfigError::Invalid {
                var: "CERTIFY_DEPLOYMENT",
                reason: format!("expected production or development, got {other:?}"),
            }),
        }
    }

    /// Returns `true` if the degraded-mode fallback may be composed in.
    pub fn fallback_allowed(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Ledger connection settings, resolved once at startup from the
/// environment and held immutable for the process lifetime.
#[derive(Clone)]
pub struct LedgerConfig {
    /// Target network identifier (informational, carried on submissions).
    pub network: String,
    /// Base URL of the ledger gateway.
    pub endpoint: String,
    /// Address of the anchoring contract on the ledger.
    pub contract_address: AccountAddress,
    /// Signing credential. Without one the client is read-only: queries
    /// work, submissions are rejected.
    pub signing_key: Option<SigningKey>,
    /// Deployment mode gating the fallback composition.
    pub mode: DeploymentMode,
    /// Per-request timeout; expiry surfaces as `LedgerError::Unavailable`.
    pub request_timeout: Duration,
}

impl LedgerConfig {
    /// Resolve the configuration from process environment variables:
    /// `CERTIFY_LEDGER_NETWORK`, `CERTIFY_LEDGER_ENDPOINT`,
    /// `CERTIFY_CONTRACT_ADDRESS`, `CERTIFY_SIGNING_KEY`,
    /// `CERTIFY_DEPLOYMENT`, `CERTIFY_LEDGER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve from an arbitrary lookup function (injectable for tests).
    ///
    /// Production deployments must name an endpoint and a contract address
    /// explicitly; development falls back to a local gateway and the zero
    /// contract address.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = match lookup("CERTIFY_DEPLOYMENT") {
            Some(raw) => DeploymentMode::parse(&raw)?,
            None => DeploymentMode::Development,
        };

        let network = lookup("CERTIFY_LEDGER_NETWORK").unwrap_or_else(|| "devnet".to_string());

        let endpoint = match (lookup("CERTIFY_LEDGER_ENDPOINT"), mode) {
            (Some(endpoint), _) => endpoint,
            (None, DeploymentMode::Development) => "http://127.0.0.1:8545".to_string(),
            (None, DeploymentMode::Production) => {
                return Err(ConfigError::Missing {
                    var: "CERTIFY_LEDGER_ENDPOINT",
                })
            }
        };

        let contract_address = match (lookup("CERTIFY_CONTRACT_ADDRESS"), mode) {
            (Some(raw), _) => AccountAddress::from_hex(&raw).map_err(|e| ConfigError::Invalid {
                var: "CERTIFY_CONTRACT_ADDRESS",
                reason: e.to_string(),
            })?,
            (None, DeploymentMode::Development) => AccountAddress::from_raw([0; 20]),
            (None, DeploymentMode::Production) => {
                return Err(ConfigError::Missing {
                    var: "CERTIFY_CONTRACT_ADDRESS",
                })
            }
        };

        let signing_key = match lookup("CERTIFY_SIGNING_KEY") {
            Some(raw) => Some(SigningKey::from_hex(&raw).map_err(|e| ConfigError::Invalid {
                var: "CERTIFY_SIGNING_KEY",
                reason: e.to_string(),
            })?),
            None => {
                tracing::warn!("no signing credential configured; ledger client is read-only");
                None
            }
        };

        let request_timeout = match lookup("CERTIFY_LEDGER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "CERTIFY_LEDGER_TIMEOUT_SECS",
                    reason: format!("expected an integer, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(30),
        };

        Ok(Self {
            network,
            endpoint,
            contract_address,
            signing_key,
            mode,
            request_timeout,
        })
    }
}

impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("network", &self.network)
            .field("endpoint", &self.endpoint)
            .field("contract_address", &self.contract_address)
            .field("signing_key", &self.signing_key.is_some())
            .field("mode", &self.mode)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Errors resolving the startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required configuration: {var}")]
    Missing { var: &'static str },

    #[error("invalid configuration for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}
