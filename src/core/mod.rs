//! Core module containing the relatorio entity, errors, and store trait

pub mod error;
pub mod extractors;
pub mod relatorio;
pub mod service;

pub use error::{ConfigError, RelatorioError, RelatorioResult, StorageError, ValidationError};
pub use extractors::{JsonBody, RecordId};
pub use relatorio::{NewRelatorio, Relatorio};
pub use service::RelatorioStore;
