//! In-memory implementation of RelatorioStore for testing and development

use crate::core::error::StorageError;
use crate::core::relatorio::{NewRelatorio, Relatorio};
use crate::core::service::RelatorioStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Relatorio>,
    last_id: i64,
}

/// In-memory record store
///
/// Mirrors the SQLite store: ids start at 1, grow monotonically, and are
/// never reused. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryRelatorioStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryRelatorioStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RelatorioStore for InMemoryRelatorioStore {
    async fn list(&self) -> Result<Vec<Relatorio>, StorageError> {
        let table = self.table.read().map_err(|_| StorageError::Lock("read"))?;

        Ok(table.rows.values().cloned().collect())
    }

    async fn create(&self, relatorio: NewRelatorio) -> Result<Relatorio, StorageError> {
        let mut table = self.table.write().map_err(|_| StorageError::Lock("write"))?;

        table.last_id += 1;
        let created = relatorio.with_id(table.last_id);
        table.rows.insert(created.id, created.clone());

        Ok(created)
    }

    async fn set_paid(&self, id: i64, is_paid: bool) -> Result<u64, StorageError> {
        let mut table = self.table.write().map_err(|_| StorageError::Lock("write"))?;

        match table.rows.get_mut(&id) {
            Some(row) => {
                row.is_paid = is_paid;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let mut table = self.table.write().map_err(|_| StorageError::Lock("write"))?;

        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}
