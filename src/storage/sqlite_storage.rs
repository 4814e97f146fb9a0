use crate::{
    error::{PersistenceError, PersistenceResult},
    storage::KeyValueStore,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

/// SQLite-based storage keeping all keys in a single `kv` table
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `database_path`
    pub fn open(database_path: impl AsRef<Path>) -> PersistenceResult<Self> {
        Self::from_connection(Connection::open(database_path)?)
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> PersistenceResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(connection: Connection) -> PersistenceResult<Self> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> PersistenceResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| {
                PersistenceError::StorageError("sqlite connection lock poisoned".to_string())
            })
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> PersistenceResult<Option<String>> {
        let value = self
            .connection()?
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.connection()?.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        tracing::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load("boards").unwrap().is_none());

        store.save("boards", "[]").unwrap();
        store.save("boards", "[{}]").unwrap();

        assert_eq!(store.load("boards").unwrap().as_deref(), Some("[{}]"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("planbord.db");

        SqliteStore::open(&db_path)
            .unwrap()
            .save("lists", "[]")
            .unwrap();

        let reopened = SqliteStore::open(&db_path).unwrap();
        assert_eq!(reopened.load("lists").unwrap().as_deref(), Some("[]"));
    }
}
