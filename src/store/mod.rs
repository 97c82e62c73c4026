//! Mission storage module with pluggable backends.
//!
//! Supports:
//! - `sqlite`: SQLite database file (the default)
//! - `memory`: In-memory table (non-persistent, for local runs and tests)
//!
//! The table is append-only: rows are inserted and scanned, never updated
//! or deleted.

mod memory;
mod sqlite;

pub use memory::InMemoryMissionStore;
pub use sqlite::SqliteMissionStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::StoreError;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// A persisted mission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    /// Insertion time, Unix epoch seconds
    pub time: i64,
}

/// Mission store trait - implemented by all storage backends.
#[async_trait]
pub trait MissionStore: Send + Sync {
    /// Whether this store persists data across restarts.
    fn is_persistent(&self) -> bool;

    /// Insert a row and return the id the store assigned to it.
    async fn insert_mission(&self, name: &str, time: i64) -> Result<i64, StoreError>;

    /// All rows, newest `time` first (ties broken by newest id).
    async fn list_missions(&self) -> Result<Vec<Mission>, StoreError>;
}

/// Open the backend selected by `storage.backend`.
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn MissionStore>, StoreError> {
    match config.backend {
        StorageBackend::Sqlite => {
            let store = SqliteMissionStore::open(&config.path, &config.table).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(InMemoryMissionStore::new())),
    }
}

/// Table names end up inside SQL text, so only plain identifiers pass.
pub fn validate_table_name(table: &str) -> Result<(), StoreError> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidTable(table.to_string()))
    }
}

/// Current wall-clock time in Unix epoch seconds.
pub fn epoch_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}
