//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteRelatorioStore`, the production record store. It owns a
//! small `sqlx::SqlitePool` (a single connection by default) and guarantees
//! the `relatorios` table exists before it is handed to any handler.

use crate::config::DatabaseConfig;
use crate::core::error::StorageError;
use crate::core::relatorio::{NewRelatorio, Relatorio};
use crate::core::service::RelatorioStore;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use std::time::Duration;

const BACKEND: &str = "SQLite";

/// Idempotent schema for the extended seven-column table.
///
/// `AUTOINCREMENT` keeps ids from being reused after a delete.
const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS relatorios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value INTEGER,
    isPaid INTEGER NOT NULL,
    order_number TEXT NOT NULL,
    tel TEXT NOT NULL,
    address TEXT NOT NULL
)
"#;

/// Row as stored, with `isPaid` still an integer
#[derive(Debug, FromRow)]
struct RelatorioRow {
    id: i64,
    name: String,
    value: Option<i64>,
    #[sqlx(rename = "isPaid")]
    is_paid: i64,
    order_number: String,
    tel: String,
    address: String,
}

impl From<RelatorioRow> for Relatorio {
    fn from(row: RelatorioRow) -> Self {
        Relatorio {
            id: row.id,
            name: row.name,
            value: row.value,
            is_paid: row.is_paid != 0,
            order_number: row.order_number,
            tel: row.tel,
            address: row.address,
        }
    }
}

/// Record store backed by a SQLite file.
#[derive(Clone, Debug)]
pub struct SqliteRelatorioStore {
    pool: SqlitePool,
}

impl SqliteRelatorioStore {
    /// Open the database and create the schema
    ///
    /// Fails if the file cannot be opened or the schema statement fails;
    /// callers must not serve traffic without a store.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);

        let (options, pool_options) = if config.is_in_memory() {
            // Every connection to :memory: is its own database, so pin one.
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(connection_error)?
                .busy_timeout(busy_timeout);
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
            (options, pool_options)
        } else {
            let path = config.resolved_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::Connection {
                    backend: BACKEND,
                    message: format!("cannot create {}: {}", parent.display(), e),
                })?;
            }
            let options = SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(busy_timeout);
            let pool_options = SqlitePoolOptions::new().max_connections(config.max_connections);
            (options, pool_options)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(connection_error)?;

        let store = Self { pool };
        store.init_schema().await?;

        tracing::info!(
            path = %config.resolved_path().display(),
            max_connections = config.max_connections,
            "Relatorio store ready"
        );
        Ok(store)
    }

    /// Open an isolated in-memory store
    pub async fn in_memory() -> Result<Self, StorageError> {
        Self::open(&DatabaseConfig::in_memory()).await
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool, waiting for in-flight statements
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Schema {
                backend: BACKEND,
                message: e.to_string(),
            })?;
        Ok(())
    }
}

fn connection_error(err: sqlx::Error) -> StorageError {
    StorageError::Connection {
        backend: BACKEND,
        message: err.to_string(),
    }
}

#[async_trait]
impl RelatorioStore for SqliteRelatorioStore {
    async fn list(&self) -> Result<Vec<Relatorio>, StorageError> {
        let rows: Vec<RelatorioRow> = sqlx::query_as(
            "SELECT id, name, value, isPaid, order_number, tel, address \
             FROM relatorios ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::query("list", e))?;

        Ok(rows.into_iter().map(Relatorio::from).collect())
    }

    async fn create(&self, relatorio: NewRelatorio) -> Result<Relatorio, StorageError> {
        let result = sqlx::query(
            "INSERT INTO relatorios (name, value, isPaid, order_number, tel, address) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&relatorio.name)
        .bind(relatorio.value)
        .bind(i64::from(relatorio.is_paid))
        .bind(&relatorio.order_number)
        .bind(&relatorio.tel)
        .bind(&relatorio.address)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::query("create", e))?;

        Ok(relatorio.with_id(result.last_insert_rowid()))
    }

    async fn set_paid(&self, id: i64, is_paid: bool) -> Result<u64, StorageError> {
        let result = sqlx::query("UPDATE relatorios SET isPaid = ? WHERE id = ?")
            .bind(i64::from(is_paid))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::query("set_paid", e))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM relatorios WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::query("delete", e))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::query("ping", e))?;
        Ok(())
    }
}
