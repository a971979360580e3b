use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// Certify HTTP server.
pub struct CertifyServer {
    config: ServerConfig,
    state: AppState,
}

impl CertifyServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("certify server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| crate::error::ServerError::Internal(e.to_string()))
    }
}
