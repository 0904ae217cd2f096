//! SQLite store with in-memory cache.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use dashmap::DashMap;
use rusqlite::{Connection, OptionalExtension};

use crate::error::StoreError;

use super::KeyValueStore;

/// SQLite-backed storage with DashMap cache.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    cache: DashMap<String, String>,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            cache: DashMap::new(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".into()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        // Check cache first
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let result: Option<String> = self
            .conn()?
            .query_row("SELECT value FROM settings WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![key, value],
        )?;

        self.cache.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.conn()?
            .execute("DELETE FROM settings WHERE key = ?", [key])?;

        self.cache.remove(key);
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let pattern = format!("{}%", prefix);
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT key FROM settings WHERE key LIKE ? ORDER BY key")?;
        let rows = stmt.query_map([&pattern], |row| row.get::<_, String>(0))?;
        let mut keys = rows.collect::<Result<Vec<_>, _>>()?;
        // LIKE treats `_` as a wildcard
        keys.retain(|key| key.starts_with(prefix));
        Ok(keys)
    }
}
