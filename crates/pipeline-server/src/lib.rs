//! HTTP server for pipeline validation

pub mod decode;
pub mod error;
pub mod handlers;
pub mod router;

use axum::Router;
use tokio::net::TcpListener;

pub use error::ApiError;
pub use router::create_router;

/// Origin of the pipeline editor frontend in development.
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: vec![DEFAULT_FRONTEND_ORIGIN.to_string()],
        }
    }
}

/// The pipeline validation server
pub struct PipelineServer {
    config: ServerConfig,
}

impl PipelineServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn router(&self) -> anyhow::Result<Router> {
        create_router(&self.config)
    }

    /// Bind and serve until Ctrl-C.
    pub async fn start(self) -> anyhow::Result<()> {
        let app = self.router()?;
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Listening on http://{}", listener.local_addr()?);
        tracing::info!("Allowed origins: {}", self.config.allowed_origins.join(", "));

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
