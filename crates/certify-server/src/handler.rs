use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Json;
use serde_json::json;

use certify_engine::LookupCriteria;
use certify_types::{CertificateDraft, CertificateRecord, RecordId};

use crate::auth::{Credentials, IssuerIdentity};
use crate::dto::{HealthResponse, IssueResponse, IssuedResponse, VerifyResponse};
use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "certify-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Issue a certificate on behalf of the authenticated issuer.
pub async fn issue_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<CertificateDraft>,
) -> ServerResult<(StatusCode, Json<IssueResponse>)> {
    let identity = authenticate(&state, &headers).await?;
    let record = state.anchor.issue(draft, identity.address).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Verify a certificate by id, fingerprint, or recipient name. Anonymous.
pub async fn verify_handler(
    State(state): State<AppState>,
    Json(criteria): Json<LookupCriteria>,
) -> ServerResult<Json<VerifyResponse>> {
    let verdict = state.resolver.resolve(&criteria).await?;
    Ok(Json(verdict.into()))
}

/// List certificates issued by the authenticated issuer.
pub async fn issued_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ServerResult<Json<IssuedResponse>> {
    let identity = authenticate(&state, &headers).await?;
    let certificates = state.anchor.issued_by(&identity.address)?;
    Ok(Json(IssuedResponse { certificates }))
}

/// Revoke a certificate. Only its issuer may revoke it.
pub async fn revoke_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ServerResult<Json<CertificateRecord>> {
    let identity = authenticate(&state, &headers).await?;
    let id = RecordId::parse(&id)
        .map_err(|e| ServerError::BadRequest(format!("invalid record id: {e}")))?;

    let issued = state.anchor.issued_by(&identity.address)?;
    if !issued.iter().any(|record| record.id == id) {
        return Err(ServerError::AuthorizationDenied(
            "certificate was not issued by this account".into(),
        ));
    }

    let revoked = state.anchor.revoke(&id)?;
    Ok(Json(revoked))
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> ServerResult<IssuerIdentity> {
    state.auth.authenticate(&bearer_credentials(headers)).await
}

fn bearer_credentials(headers: &HeaderMap) -> Credentials {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| Credentials::Bearer(token.to_string()))
        .unwrap_or(Credentials::Anonymous)
}
