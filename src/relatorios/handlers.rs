//! HTTP handlers for relatorio operations
//!
//! Each handler validates its input, issues exactly one statement through
//! the [`RelatorioStore`], and shapes the result into JSON. Handlers never
//! call each other.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::error::{RelatorioError, RelatorioResult};
use crate::core::extractors::{JsonBody, RecordId};
use crate::core::relatorio::{NewRelatorio, Relatorio, paid_status_from_payload};
use crate::core::service::RelatorioStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct RelatorioState {
    pub store: Arc<dyn RelatorioStore>,
}

impl RelatorioState {
    pub fn new(store: Arc<dyn RelatorioStore>) -> Self {
        Self { store }
    }
}

/// Response for the set-paid endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Response for the delete endpoint
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangesResponse {
    pub changes: u64,
}

/// List every relatorio
///
/// GET /relatorios
pub async fn list_relatorios(
    State(state): State<RelatorioState>,
) -> RelatorioResult<Json<Vec<Relatorio>>> {
    let relatorios = state.store.list().await?;
    tracing::debug!(count = relatorios.len(), "Listed relatorios");
    Ok(Json(relatorios))
}

/// Create a relatorio
///
/// POST /relatorios
///
/// Returns 201 with the stored record, including its assigned id. Two
/// identical payloads create two rows.
pub async fn create_relatorio(
    State(state): State<RelatorioState>,
    JsonBody(body): JsonBody,
) -> RelatorioResult<Response> {
    let new = NewRelatorio::from_payload(&body)?;
    let created = state.store.create(new).await?;

    tracing::info!(
        id = created.id,
        order_number = %created.order_number,
        is_paid = created.is_paid,
        "Created relatorio"
    );
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// Set the paid status of a relatorio
///
/// PUT /relatorios/{id}
///
/// Body: `{"isPaid": true}`. Only `isPaid` is mutable.
pub async fn set_relatorio_paid(
    State(state): State<RelatorioState>,
    RecordId(id): RecordId,
    JsonBody(body): JsonBody,
) -> RelatorioResult<Json<SuccessResponse>> {
    let is_paid = paid_status_from_payload(&body)?;

    if state.store.set_paid(id, is_paid).await? == 0 {
        return Err(RelatorioError::NotFound { id });
    }

    tracing::info!(id, is_paid, "Updated relatorio paid status");
    Ok(Json(SuccessResponse { success: true }))
}

/// Delete a relatorio
///
/// DELETE /relatorios/{id}
///
/// Deleting an unknown id is not an error; callers inspect `changes`.
pub async fn delete_relatorio(
    State(state): State<RelatorioState>,
    RecordId(id): RecordId,
) -> RelatorioResult<Json<ChangesResponse>> {
    let changes = state.store.delete(id).await?;

    tracing::info!(id, changes, "Deleted relatorio");
    Ok(Json(ChangesResponse { changes }))
}
