//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::domain::{ConnectionLifecycle, ConnectionRegistry};

use super::{
    config::{ConfigError, HEALTH_PATH, OriginPolicy, ServerConfig},
    handler::{health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(InMemoryConnectionRegistry::new());
/// let handler = Arc::new(RelayHandler::new(registry.clone()));
/// let server = Server::new(ServerConfig::default(), handler, registry)?;
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// Relay protocol handler（接続ライフサイクルの抽象化）
    lifecycle: Arc<dyn ConnectionLifecycle>,
    /// Registry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn new(
        config: ServerConfig,
        lifecycle: Arc<dyn ConnectionLifecycle>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            lifecycle,
            registry,
        })
    }

    /// Build the router: relay endpoint plus health check
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            lifecycle: self.lifecycle.clone(),
            registry: self.registry.clone(),
            config: self.config.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route(&self.config.path, get(websocket_handler))
            // HTTP エンドポイント
            .route(HEALTH_PATH, get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.serve(listener, shutdown_signal()).await?;
        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        tracing::info!("WebSocket chat relay listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}{}", local_addr, self.config.path);
        match &self.config.origin_policy {
            OriginPolicy::Any => {
                tracing::warn!("Origin checking is disabled; any origin may connect")
            }
            OriginPolicy::AllowList(origins) => {
                tracing::info!("Allowed origins: {}", origins.join(", "))
            }
        }

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
