//! SQLite-backed mission store.

use super::{validate_table_name, Mission, MissionStore};
use crate::error::StoreError;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct SqliteMissionStore {
    conn: Arc<Mutex<Connection>>,
    insert_sql: String,
    select_sql: String,
}

impl SqliteMissionStore {
    /// Open (or create) the database file and make sure the table exists.
    pub async fn open(path: &str, table: &str) -> Result<Self, StoreError> {
        validate_table_name(table)?;

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let schema = schema_sql(table);
        let db_path = path.to_string();
        let conn = tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)?;
            conn.execute_batch(&schema)?;
            Ok::<_, StoreError>(conn)
        })
        .await??;

        Ok(Self::with_connection(conn, table))
    }

    /// Private in-memory database, used by tests.
    #[cfg(test)]
    pub fn open_in_memory(table: &str) -> Result<Self, StoreError> {
        validate_table_name(table)?;
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&schema_sql(table))?;
        Ok(Self::with_connection(conn, table))
    }

    fn with_connection(conn: Connection, table: &str) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            insert_sql: format!("INSERT INTO {table} (name, time) VALUES (?1, ?2)"),
            select_sql: format!("SELECT id, name, time FROM {table} ORDER BY time DESC, id DESC"),
        }
    }
}

fn schema_sql(table: &str) -> String {
    format!(
        "PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS {table} (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    time INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_{table}_time ON {table}(time DESC);"
    )
}

#[async_trait]
impl MissionStore for SqliteMissionStore {
    fn is_persistent(&self) -> bool {
        true
    }

    async fn insert_mission(&self, name: &str, time: i64) -> Result<i64, StoreError> {
        let conn = self.conn.clone();
        let sql = self.insert_sql.clone();
        let name = name.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            conn.execute(&sql, params![name, time])?;
            Ok::<_, StoreError>(conn.last_insert_rowid())
        })
        .await?
    }

    async fn list_missions(&self) -> Result<Vec<Mission>, StoreError> {
        let conn = self.conn.clone();
        let sql = self.select_sql.clone();
        tokio::task::spawn_blocking(move || {
            let conn = conn.blocking_lock();
            let mut stmt = conn.prepare(&sql)?;
            let missions = stmt
                .query_map([], |row| {
                    Ok(Mission {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        time: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, StoreError>(missions)
        })
        .await?
    }
}
