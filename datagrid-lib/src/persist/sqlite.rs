//! SQLite filter store.

use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;

use log::debug;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

use super::FilterStore;
use crate::error::StoreError;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS table_filters (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";

/// SQLite-backed filter storage.
///
/// One row per table id in `table_filters`. The connection is guarded by a
/// mutex so the store can be shared across threads.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file at the given path.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        debug!("[persist] opening sqlite store at {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(SCHEMA, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl FilterStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM table_filters WHERE key = ?",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO table_filters (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM table_filters WHERE key = ?", [key])?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        // substr instead of LIKE: table ids may contain '%' or '_'.
        let mut stmt = conn.prepare(
            "SELECT key FROM table_filters WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
        )?;
        let rows = stmt.query_map([prefix], |row| row.get::<_, String>(0))?;
        let keys = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}
