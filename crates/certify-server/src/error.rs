use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use certify_engine::EngineError;
use certify_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            Self::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Engine(engine) => match engine {
                EngineError::InvalidCertificateData(_) => StatusCode::UNPROCESSABLE_ENTITY,
                EngineError::IssuanceFailed(_) => StatusCode::BAD_GATEWAY,
                EngineError::VerificationUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                EngineError::InvalidTransition { .. } => StatusCode::CONFLICT,
                EngineError::Store(StoreError::RecordNotFound(_)) => StatusCode::NOT_FOUND,
                EngineError::Store(_) | EngineError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
