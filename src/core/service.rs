//! Store trait for relatorio persistence

use crate::core::error::StorageError;
use crate::core::relatorio::{NewRelatorio, Relatorio};
use async_trait::async_trait;

/// Service trait for the record store
///
/// Implementations own the `relatorios` table and issue exactly one
/// statement per call. Handlers only ever see this trait.
#[async_trait]
pub trait RelatorioStore: Send + Sync {
    /// List every relatorio in id order
    async fn list(&self) -> Result<Vec<Relatorio>, StorageError>;

    /// Persist a new relatorio and return it with its assigned id
    async fn create(&self, relatorio: NewRelatorio) -> Result<Relatorio, StorageError>;

    /// Set the paid flag of one relatorio
    ///
    /// Returns the number of rows matched (0 or 1). Setting the flag to its
    /// current value still counts as a match.
    async fn set_paid(&self, id: i64, is_paid: bool) -> Result<u64, StorageError>;

    /// Delete one relatorio, returning the number of rows removed (0 or 1)
    async fn delete(&self, id: i64) -> Result<u64, StorageError>;

    /// Check that the store can serve statements
    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
