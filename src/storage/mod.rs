//! Storage implementations for the record store

#[cfg(feature = "in-memory")]
pub mod in_memory;
pub mod sqlite;

#[cfg(feature = "in-memory")]
pub use in_memory::InMemoryRelatorioStore;
pub use sqlite::SqliteRelatorioStore;
