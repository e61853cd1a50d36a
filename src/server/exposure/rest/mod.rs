//! REST API exposure
//!
//! Assembles the relatorio routes, the health routes, and the HTTP
//! middleware stack into a single Axum `Router`.

use crate::config::ServerConfig;
use crate::relatorios::RelatorioState;
use crate::server::router::{build_legacy_routes, build_relatorio_routes};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router
    ///
    /// # Arguments
    ///
    /// * `state` - Shared handler state holding the record store
    /// * `config` - Server configuration (controls the legacy aliases)
    /// * `custom_routes` - Additional custom routes to merge
    pub fn build_router(
        state: RelatorioState,
        config: &ServerConfig,
        custom_routes: Vec<Router>,
    ) -> Router {
        let mut app =
            Self::health_routes(state.clone()).merge(build_relatorio_routes(state.clone()));

        if config.legacy_routes {
            app = app.merge(build_legacy_routes(state));
        }

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
    }

    /// Build health check routes
    fn health_routes(state: RelatorioState) -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
            .route("/ready", get(Self::readiness_check))
            .with_state(state)
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "relatorios"
        }))
    }

    /// Readiness endpoint handler: 503 until the store answers
    async fn readiness_check(State(state): State<RelatorioState>) -> (StatusCode, Json<Value>) {
        match state.store.ping().await {
            Ok(()) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
            Err(e) => {
                tracing::warn!(error = %e, "Readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "status": "unavailable" })),
                )
            }
        }
    }
}
