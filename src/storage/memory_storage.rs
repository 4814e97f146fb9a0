use crate::{
    error::{PersistenceError, PersistenceResult},
    storage::KeyValueStore,
};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

/// In-process storage; contents are lost when the store is dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with raw values, e.g. payloads of an older app version
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Returns the raw stored value, or `None` when the key is absent or the store is poisoned
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.lock().ok().and_then(|entries| entries.get(key).cloned())
    }

    fn lock(&self) -> PersistenceResult<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| PersistenceError::StorageError("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> PersistenceResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
