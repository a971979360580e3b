use std::collections::HashMap;

use async_trait::async_trait;

use certify_types::AccountAddress;

use crate::error::{ServerError, ServerResult};

/// The authenticated issuer on whose behalf certificates are issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuerIdentity {
    pub name: String,
    pub address: AccountAddress,
}

impl IssuerIdentity {
    pub fn new(name: impl Into<String>, address: AccountAddress) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

#[derive(Clone, Debug)]
pub enum Credentials {
    Bearer(String),
    Anonymous,
}

/// Identity collaborator: maps caller credentials to an issuer account.
///
/// Issuance and the issued-by listing require an authenticated issuer;
/// verification is open to anonymous callers and never consults this trait.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<IssuerIdentity>;
}

/// Token-table authentication for development and tests.
pub struct StaticTokenAuth {
    tokens: HashMap<String, IssuerIdentity>,
}

impl StaticTokenAuth {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    /// Register a bearer token for an issuer.
    pub fn with_token(mut self, token: impl Into<String>, identity: IssuerIdentity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

impl Default for StaticTokenAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn authenticate(&self, credentials: &Credentials) -> ServerResult<IssuerIdentity> {
        match credentials {
            Credentials::Bearer(token) => self
                .tokens
                .get(token)
                .cloned()
                .ok_or_else(|| ServerError::AuthFailed("unknown bearer token".into())),
            Credentials::Anonymous => Err(ServerError::AuthFailed(
                "issuance requires a bearer token".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> IssuerIdentity {
        IssuerIdentity::new("Analytical Society", AccountAddress::from_raw([9; 20]))
    }

    #[tokio::test]
    async fn known_token_authenticates() {
        let auth = StaticTokenAuth::new().with_token("secret", identity());
        let resolved = auth
            .authenticate(&Credentials::Bearer("secret".into()))
            .await
            .unwrap();
        assert_eq!(resolved, identity());
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let auth = StaticTokenAuth::new().with_token("secret", identity());
        let err = auth
            .authenticate(&Credentials::Bearer("wrong".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::AuthFailed(_)));
    }

    #[tokio::test]
    async fn anonymous_cannot_issue() {
        let auth = StaticTokenAuth::new();
        let err = auth.authenticate(&Credentials::Anonymous).await.unwrap_err();
        assert!(matches!(err, ServerError::AuthFailed(_)));
    }
}
