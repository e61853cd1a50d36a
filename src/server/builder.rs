//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use crate::config::ServerConfig;
use crate::core::service::RelatorioStore;
use crate::relatorios::RelatorioState;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the relatorios HTTP server
///
/// # Example
///
/// ```ignore
/// let store = SqliteRelatorioStore::open(&config.database).await?;
/// ServerBuilder::new()
///     .with_store(store)
///     .with_config(config.server.clone())
///     .serve(&config.server.bind_address())
///     .await?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn RelatorioStore>>,
    config: ServerConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            config: ServerConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the record store (required)
    pub fn with_store(mut self, store: impl RelatorioStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the server configuration
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes outside the relatorio contract, e.g. a static
    /// page or an admin endpoint.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        let store = self
            .store
            .ok_or_else(|| anyhow::anyhow!("RelatorioStore is required. Call .with_store()"))?;

        let state = RelatorioState::new(store);
        Ok(RestExposure::build_router(
            state,
            &self.config,
            self.custom_routes,
        ))
    }

    /// Bind `addr` and serve until SIGINT or SIGTERM
    ///
    /// In-flight requests finish before this returns, so the caller can close
    /// the store afterwards.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "Relatorios API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let signal = shutdown_signal().await;
                tracing::info!(signal, "Draining connections");
            })
            .await?;
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve with the name of the first termination signal received
///
/// A handler that cannot be installed never fires; the other one still can.
async fn shutdown_signal() -> &'static str {
    let interrupt = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::warn!(error = %e, "SIGINT handler unavailable");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    }
}
