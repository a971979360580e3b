use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Certify endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/certificates/issue", post(handler::issue_handler))
        .route("/v1/certificates/verify", post(handler::verify_handler))
        .route("/v1/certificates/issued", get(handler::issued_handler))
        .route(
            "/v1/certificates/:id/revoke",
            post(handler::revoke_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
