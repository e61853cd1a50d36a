//! Axum extractors for relatorio requests
//!
//! `JsonBody` replaces axum's `Json` rejection (415/422 plain text) with the
//! shared `{"error": ...}` shape, and `RecordId` turns the `{id}` path
//! segment into a validated integer.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde_json::{Map, Value};

use crate::core::error::{RelatorioError, ValidationError};
use crate::core::relatorio::parse_id;

/// A request body that must be a JSON object
#[derive(Debug, Clone)]
pub struct JsonBody(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = RelatorioError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidBody(e.body_text()))?;

        match payload {
            Value::Object(map) => Ok(JsonBody(map)),
            other => Err(ValidationError::InvalidBody(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))
            .into()),
        }
    }
}

/// The `{id}` path segment of a relatorio route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = RelatorioError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationError::MissingId)?;

        Ok(RecordId(parse_id(&raw)?))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
