//! Typed error handling for the relatorios backend
//!
//! Every failure a handler can produce is a [`RelatorioError`]. The error
//! knows its HTTP status and machine-readable code, and renders itself as the
//! `{"error": ..., "code": ...}` body shared by all endpoints.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: missing or malformed request input (400)
//! - [`RelatorioError::NotFound`]: update target absent (404)
//! - [`StorageError`]: the record store failed (500, cause logged only)
//! - [`ConfigError`]: configuration could not be loaded or is invalid;
//!   returned by `AppConfig` at startup, never by a handler
//!
//! # Example
//!
//! ```rust,ignore
//! match store.set_paid(id, true).await? {
//!     0 => Err(RelatorioError::NotFound { id }),
//!     _ => Ok(Json(SuccessResponse::ok())),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Message returned to callers for every 500-class error.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// The main error type for the relatorios backend
#[derive(Debug, Error)]
pub enum RelatorioError {
    /// Request input was missing or malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record matched the given id
    #[error("Relatório not found")]
    NotFound { id: i64 },

    /// The record store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: &'static str,
}

impl RelatorioError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelatorioError::Validation(_) => StatusCode::BAD_REQUEST,
            RelatorioError::NotFound { .. } => StatusCode::NOT_FOUND,
            RelatorioError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RelatorioError::Validation(e) => e.error_code(),
            RelatorioError::NotFound { .. } => "RELATORIO_NOT_FOUND",
            RelatorioError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether the error is the caller's fault (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to an error response
    ///
    /// Server-side failures are reported with a generic message so store
    /// internals never reach the caller.
    pub fn to_response(&self) -> ErrorResponse {
        let error = if self.is_client_error() {
            self.to_string()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        };

        ErrorResponse {
            error,
            code: self.error_code(),
        }
    }
}

impl IntoResponse for RelatorioError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.error_code(), "request failed");
        } else {
            tracing::debug!(error = %self, code = self.error_code(), "request rejected");
        }

        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The path carried no record id
    #[error("Missing id")]
    MissingId,

    /// The path id is not an integer
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// One or more required create fields were absent or empty
    #[error("Missing {0}")]
    MissingFields(&'static str),

    /// `isPaid` was absent or not a boolean on update
    #[error("Missing isPaid status")]
    MissingIsPaid,

    /// A field was present but had the wrong JSON type
    #[error("Invalid field '{field}': {message}")]
    InvalidField {
        field: &'static str,
        message: &'static str,
    },

    /// The request body was not a JSON object
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingId => "MISSING_ID",
            ValidationError::InvalidId(_) => "INVALID_ID",
            ValidationError::MissingFields(_) => "MISSING_FIELDS",
            ValidationError::MissingIsPaid => "MISSING_IS_PAID",
            ValidationError::InvalidField { .. } => "INVALID_FIELD",
            ValidationError::InvalidBody(_) => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the record store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Opening the database failed
    #[error("Failed to open {backend} database: {message}")]
    Connection {
        backend: &'static str,
        message: String,
    },

    /// Creating the schema failed
    #[error("Failed to initialize {backend} schema: {message}")]
    Schema {
        backend: &'static str,
        message: String,
    },

    /// A statement failed at request time
    #[error("{backend} query failed during {operation}: {message}")]
    Query {
        backend: &'static str,
        operation: &'static str,
        message: String,
    },

    /// An in-process lock was poisoned
    #[error("Failed to acquire {0} lock")]
    Lock(&'static str),
}

impl StorageError {
    pub(crate) fn query(operation: &'static str, err: sqlx::Error) -> Self {
        StorageError::Query {
            backend: "SQLite",
            operation,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("Failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    /// Failed to parse YAML
    #[error("Failed to parse config{}: {message}", file_suffix(.file))]
    Parse {
        file: Option<String>,
        message: String,
    },

    /// An environment override could not be applied
    #[error("Invalid value for {var}: {message}")]
    Env { var: &'static str, message: String },

    /// A loaded value is out of range
    #[error("Invalid config value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

/// Result type alias for handler and store operations
pub type RelatorioResult<T> = Result<T, RelatorioError>;
