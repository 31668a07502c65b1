//! API server
//!
//! Serves the wrapper facade to hosted game content with CORS, request
//! tracing, a request timeout, and graceful shutdown.

use super::{handlers::AppState, middleware::create_cors_layer, routes::create_router};
use crate::errors::WrapperResult;
use crate::session::Session;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Facade server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

/// HTTP facade over one wrapper session
pub struct ApiServer {
    config: ApiConfig,
    session: Arc<Session>,
}

impl ApiServer {
    pub fn new(config: ApiConfig, session: Arc<Session>) -> Self {
        Self { config, session }
    }

    /// Serve until ctrl-c
    pub async fn run(self) -> WrapperResult<()> {
        let state = Arc::new(AppState {
            session: self.session,
            version: env!("CARGO_PKG_VERSION").to_string(),
        });

        let app = create_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_secs,
            )))
            .layer(create_cors_layer(self.config.allowed_origins.clone()));

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| {
                crate::errors::WrapperError::Configuration(format!("invalid bind address: {}", e))
            })?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("wrapper facade listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown signal received");
}
