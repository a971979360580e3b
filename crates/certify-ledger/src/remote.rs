use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use certify_crypto::{ContentHasher, SigningKey};
use certify_types::{AccountAddress, AnchorBackend, Fingerprint, TransactionId};

use crate::config::{ConfigError, LedgerConfig};
use crate::entry::{AnchorReceipt, AnchorSubmission, AnchoredEntry, LedgerAnswer};
use crate::error::LedgerError;
use crate::traits::LedgerClient;

/// Network-backed ledger client speaking JSON over HTTP to a ledger gateway.
///
/// Submissions are signed with the configured ed25519 credential: the client
/// hashes the submission payload under the `certify-submission-v1` domain and
/// signs the digest, and the gateway attributes the resulting ledger entry to
/// the signer's account. `submit` returns only once the gateway reports the
/// transaction committed. All transport failures, including the configured
/// request timeout, surface as `LedgerError::Unavailable`.
pub struct HttpLedgerClient {
    http: reqwest::Client,
    endpoint: String,
    network: String,
    contract_address: AccountAddress,
    signer: Option<SigningKey>,
}

impl HttpLedgerClient {
    /// Build a client from the resolved startup configuration.
    pub fn new(config: &LedgerConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                var: "CERTIFY_LEDGER_TIMEOUT_SECS",
                reason: format!("failed to construct http client: {e}"),
            })?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            network: config.network.clone(),
            contract_address: config.contract_address,
            signer: config.signing_key.clone(),
        })
    }

    fn anchors_url(&self) -> String {
        format!("{}/v1/anchors", self.endpoint)
    }

    fn anchor_url(&self, fingerprint: &Fingerprint) -> String {
        format!("{}/v1/anchors/{}", self.endpoint, fingerprint.to_hex())
    }
}

/// Wire shape of a signed submission.
#[derive(Serialize)]
struct SubmitRequest<'a> {
    network: &'a str,
    contract_address: AccountAddress,
    submission: &'a AnchorSubmission,
    sender: AccountAddress,
    /// Hex-encoded ed25519 signature over the submission digest.
    signature: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    transaction_id: TransactionId,
    block_ref: u64,
}

#[derive(Deserialize)]
struct QueryResponse {
    anchored: bool,
    #[serde(default)]
    entry: Option<AnchoredEntry>,
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn submit(&self, submission: &AnchorSubmission) -> Result<AnchorReceipt, LedgerError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            LedgerError::Rejected("submission requires a signing credential".into())
        })?;

        let digest = ContentHasher::SUBMISSION
            .hash_json(submission)
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let signature = signer.sign(digest.as_bytes());

        let request = SubmitRequest {
            network: &self.network,
            contract_address: self.contract_address,
            submission,
            sender: signer.account_address(),
            signature: hex::encode(signature.to_bytes()),
        };

        tracing::debug!(
            fingerprint = %submission.fingerprint,
            network = %self.network,
            "submitting anchor"
        );

        let response = self
            .http
            .post(self.anchors_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected(format!("{status}: {body}")));
        }
        if !status.is_success() {
            return Err(LedgerError::Unavailable(format!(
                "gateway returned {status}"
            )));
        }

        let confirmed: SubmitResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        tracing::info!(
            fingerprint = %submission.fingerprint,
            transaction = %confirmed.transaction_id,
            block = confirmed.block_ref,
            "anchor confirmed"
        );

        Ok(AnchorReceipt {
            transaction_id: confirmed.transaction_id,
            block_ref: confirmed.block_ref,
            backend: AnchorBackend::Network,
        })
    }

    async fn query(&self, fingerprint: &Fingerprint) -> Result<LedgerAnswer, LedgerError> {
        let response = self
            .http
            .get(self.anchor_url(fingerprint))
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(LedgerAnswer::NotAnchored);
        }
        if !status.is_success() {
            return Err(LedgerError::Unavailable(format!(
                "gateway returned {status}"
            )));
        }

        let answer: QueryResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;

        Ok(match (answer.anchored, answer.entry) {
            (true, Some(entry)) => LedgerAnswer::Anchored(entry),
            _ => LedgerAnswer::NotAnchored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(endpoint: &str) -> LedgerConfig {
        LedgerConfig {
            network: "devnet".into(),
            endpoint: endpoint.into(),
            contract_address: AccountAddress::from_raw([1; 20]),
            signing_key: None,
            mode: crate::config::DeploymentMode::Development,
            request_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn endpoint_trailing_slash_is_normalized() {
        let client = HttpLedgerClient::new(&config("http://ledger.example.org/")).unwrap();
        assert_eq!(client.anchors_url(), "http://ledger.example.org/v1/anchors");
        let fp = Fingerprint::from_hash([3; 32]);
        assert_eq!(
            client.anchor_url(&fp),
            format!("http://ledger.example.org/v1/anchors/{}", fp.to_hex())
        );
    }

    #[tokio::test]
    async fn submit_without_signer_is_rejected() {
        let client = HttpLedgerClient::new(&config("http://127.0.0.1:1")).unwrap();
        let submission = AnchorSubmission {
            fingerprint: Fingerprint::from_hash([1; 32]),
            recipient_name: "Ada".into(),
            issuer_name: "Society".into(),
            issue_epoch: 1_700_000_000,
            expiry_epoch: 0,
        };
        // The signer check happens before any network traffic.
        let err = client.submit(&submission).await.unwrap_err();
        assert!(matches!(err, LedgerError::Rejected(_)));
    }

    #[tokio::test]
    async fn unreachable_gateway_is_unavailable() {
        // Port 1 refuses connections immediately.
        let client = HttpLedgerClient::new(&config("http://127.0.0.1:1")).unwrap();
        let err = client
            .query(&Fingerprint::from_hash([1; 32]))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unavailable(_)));
    }

    #[test]
    fn query_response_shapes() {
        let parsed: QueryResponse =
            serde_json::from_str(r#"{"anchored": false}"#).unwrap();
        assert!(!parsed.anchored);
        assert!(parsed.entry.is_none());

        let entry = AnchoredEntry {
            fingerprint: Fingerprint::from_hash([1; 32]),
            issuer_address: AccountAddress::from_raw([2; 20]),
            recipient_name: "Ada".into(),
            issue_epoch: 1_700_000_000,
            expiry_epoch: 0,
            block_ref: 10,
        };
        let json = serde_json::json!({"anchored": true, "entry": entry}).to_string();
        let parsed: QueryResponse = serde_json::from_str(&json).unwrap();
        assert!(parsed.anchored);
        assert_eq!(parsed.entry.unwrap(), entry);
    }
}
