//! HTTP server for Certify.
//!
//! A thin axum surface over the core engine: issuance and the issued-by
//! listing require a bearer-authenticated issuer, verification is open to
//! anonymous callers. All trust decisions live in the engine; this crate
//! only maps transport concerns (auth headers, status codes, JSON bodies).

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use auth::{AuthProvider, Credentials, IssuerIdentity, StaticTokenAuth};
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::CertifyServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::util::ServiceExt;

    use certify_ledger::StubLedger;
    use certify_store::InMemoryRecordStore;
    use certify_types::AccountAddress;

    fn issuer_address() -> AccountAddress {
        AccountAddress::from_raw([9; 20])
    }

    fn test_state() -> AppState {
        let auth = StaticTokenAuth::new().with_token(
            "issuer-token",
            IssuerIdentity::new("Analytical Society", issuer_address()),
        );
        AppState::compose(
            Arc::new(StubLedger::new(issuer_address())),
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(auth),
        )
    }

    fn issue_request(body: serde_json::Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/v1/certificates/issue")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn verify_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/certificates/verify")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn draft_body() -> serde_json::Value {
        serde_json::json!({
            "recipient_name": "Ada Lovelace",
            "recipient_email": "ada@example.org",
            "title": "Certificate X",
            "description": "Completed the analytical engine course",
            "issuer_name": "Analytical Society"
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = router::build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let app = router::build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/v1/info").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn issue_then_verify_roundtrip() {
        let state = test_state();
        let app = router::build_router(state.clone());

        let response = app
            .clone()
            .oneshot(issue_request(draft_body(), Some("issuer-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let issued = body_json(response).await;
        let fingerprint = issued["record"]["fingerprint"].as_str().unwrap().to_string();
        assert_eq!(issued["record"]["status"], "valid");

        let response = app
            .oneshot(verify_request(
                serde_json::json!({ "fingerprint": fingerprint }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let verdict = body_json(response).await;
        assert_eq!(verdict["found"], true);
        assert_eq!(verdict["status"], serde_json::json!({"verified": "valid"}));
        assert_eq!(verdict["confidence"], "exact");
    }

    #[tokio::test]
    async fn issue_without_token_is_unauthorized() {
        let app = router::build_router(test_state());
        let response = app
            .oneshot(issue_request(draft_body(), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_draft_is_unprocessable() {
        let app = router::build_router(test_state());
        let mut body = draft_body();
        body["recipient_name"] = serde_json::json!("");
        let response = app
            .oneshot(issue_request(body, Some("issuer-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn verify_miss_is_ok_with_not_found() {
        let app = router::build_router(test_state());
        let response = app
            .oneshot(verify_request(
                serde_json::json!({ "recipient_name": "nobody" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let verdict = body_json(response).await;
        assert_eq!(verdict["found"], false);
        assert_eq!(verdict["status"], "not_found");
    }

    #[tokio::test]
    async fn issued_listing_requires_auth_and_filters() {
        let app = router::build_router(test_state());

        let response = app
            .clone()
            .oneshot(issue_request(draft_body(), Some("issuer-token")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/v1/certificates/issued")
                    .header(header::AUTHORIZATION, "Bearer issuer-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listing = body_json(response).await;
        assert_eq!(listing["certificates"].as_array().unwrap().len(), 1);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/certificates/issued")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn revoke_then_verify_reports_revoked() {
        let app = router::build_router(test_state());

        let response = app
            .clone()
            .oneshot(issue_request(draft_body(), Some("issuer-token")))
            .await
            .unwrap();
        let issued = body_json(response).await;
        let id = issued["record"]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/v1/certificates/{id}/revoke"))
                    .header(header::AUTHORIZATION, "Bearer issuer-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(verify_request(serde_json::json!({ "record_id": id })))
            .await
            .unwrap();
        let verdict = body_json(response).await;
        assert_eq!(verdict["status"], serde_json::json!({"verified": "revoked"}));
    }

    #[tokio::test]
    async fn revoking_anothers_certificate_is_forbidden() {
        let other_auth = StaticTokenAuth::new()
            .with_token(
                "issuer-token",
                IssuerIdentity::new("Analytical Society", issuer_address()),
            )
            .with_token(
                "other-token",
                IssuerIdentity::new("Other Society", AccountAddress::from_raw([5; 20])),
            );
        let state = AppState::compose(
            Arc::new(StubLedger::new(issuer_address())),
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(other_auth),
        );
        let app = router::build_router(state);

        let response = app
            .clone()
            .oneshot(issue_request(draft_body(), Some("issuer-token")))
            .await
            .unwrap();
        let issued = body_json(response).await;
        let id = issued["record"]["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/v1/certificates/{id}/revoke"))
                    .header(header::AUTHORIZATION, "Bearer other-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
