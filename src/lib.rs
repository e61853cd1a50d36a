//! # Relatorios
//!
//! A small record-keeping backend for a retail shop's orders ("relatórios").
//! Each relatorio carries a customer name, a value, a paid flag, and the
//! order's number, phone, and delivery address.
//!
//! ## Features
//!
//! - **Record Store**: SQLite-backed table created idempotently at startup
//! - **Four handlers**: list, create, set paid status, delete
//! - **Typed errors**: 400 / 404 / 500 with a uniform `{"error": ...}` body
//! - **Pluggable storage**: the `RelatorioStore` trait, with an in-memory
//!   implementation for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relatorios::prelude::*;
//!
//! let config = AppConfig::load()?;
//! let store = SqliteRelatorioStore::open(&config.database).await?;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .with_config(config.server.clone())
//!     .serve(&config.server.bind_address())
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod relatorios;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ConfigError, JsonBody, NewRelatorio, RecordId, Relatorio, RelatorioError,
        RelatorioResult, RelatorioStore, StorageError, ValidationError,
    };

    // === Handlers ===
    pub use crate::relatorios::{
        ChangesResponse, RelatorioState, SuccessResponse, create_relatorio, delete_relatorio,
        list_relatorios, set_relatorio_paid,
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryRelatorioStore;
    pub use crate::storage::SqliteRelatorioStore;

    // === Config ===
    pub use crate::config::{AppConfig, DatabaseConfig, LoggingConfig, ServerConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use async_trait::async_trait;
}
