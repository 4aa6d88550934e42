//! Threads server lifecycle.

use crate::api::{build_router, AppState};
use crate::assets::Assets;
use crate::config::ServerConfig;
use crate::error::Result;
use axum::Router;
use std::sync::Arc;
use threads_core::ProgressStore;
use tower_http::trace::TraceLayer;

/// A running Threads of Tradition server.
pub struct ThreadsServer {
    config: ServerConfig,
    state: AppState,
}

impl ThreadsServer {
    /// Create a new server, opening the progress store.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let store = ProgressStore::open(&config.state_path, config.reset_policy)?;
        let state = AppState {
            store: Arc::new(store),
            assets: Assets::new(config.static_dir.clone()),
        };
        Ok(Self { config, state })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// HTTP router with request tracing.
    pub fn router(&self) -> Router {
        build_router(self.state.clone()).layer(TraceLayer::new_for_http())
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        tracing::info!("Threads server starting");
        tracing::info!("  HTTP: http://{}", self.config.listen_addr);
        tracing::info!("  State: {}", self.config.state_path.display());
        tracing::info!("  Static: {}", self.config.static_dir.display());
        tracing::info!("  Reset policy: {:?}", self.config.reset_policy);

        if !self.config.static_dir.is_dir() {
            tracing::warn!(
                dir = %self.config.static_dir.display(),
                "static directory missing, only the API will be useful"
            );
        }

        let app = self.router();
        let listener = tokio::net::TcpListener::bind(self.config.listen_addr).await?;
        tracing::info!("HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Threads server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
