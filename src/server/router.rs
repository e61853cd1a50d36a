//! Router builder utilities for relatorio routes

use crate::relatorios::{
    RelatorioState, create_relatorio, delete_relatorio, list_relatorios, set_relatorio_paid,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Build the relatorio routes
///
/// - GET /relatorios - List all relatorios
/// - POST /relatorios - Create a relatorio
/// - PUT /relatorios/{id} - Set the paid status
/// - DELETE /relatorios/{id} - Delete a relatorio
pub fn build_relatorio_routes(state: RelatorioState) -> Router {
    Router::new()
        .route("/relatorios", get(list_relatorios).post(create_relatorio))
        .route(
            "/relatorios/{id}",
            put(set_relatorio_paid).delete(delete_relatorio),
        )
        .with_state(state)
}

/// Build the file-routed aliases still called by existing front-end clients
///
/// - GET /api/relatorios/get
/// - POST /api/relatorios/post
/// - PUT /api/relatorios/put/{id}
/// - DELETE /api/relatorios/delete/{id}
pub fn build_legacy_routes(state: RelatorioState) -> Router {
    Router::new()
        .route("/api/relatorios/get", get(list_relatorios))
        .route("/api/relatorios/post", post(create_relatorio))
        .route("/api/relatorios/put/{id}", put(set_relatorio_paid))
        .route("/api/relatorios/delete/{id}", delete(delete_relatorio))
        .with_state(state)
}
