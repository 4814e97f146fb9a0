//! Stateful owners of the board and list collections.
//!
//! Each registry keeps its collection in memory and rewrites the full
//! collection to the key-value store after every mutation. Storage failures
//! are logged and otherwise ignored: the in-memory state stays authoritative
//! for the rest of the session.

pub mod board_registry;
pub mod list_registry;

pub use board_registry::BoardRegistry;
pub use list_registry::ListRegistry;

use crate::{error::PersistenceResult, storage::KeyValueStore};
use serde::Serialize;

/// Serializes `value` and writes it under `key`, logging instead of failing
fn persist<T: Serialize + ?Sized>(store: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = write_json(store, key, value) {
        tracing::error!("Failed to save '{}': {}", key, e);
    }
}

fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> PersistenceResult<()> {
    let json = serde_json::to_string(value)?;
    store.save(key, &json)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{
        error::{PersistenceError, PersistenceResult},
        storage::{KeyValueStore, MemoryStore},
    };

    /// Store whose reads and/or writes always fail; successful writes go to `inner`
    #[derive(Default)]
    pub struct FlakyStore {
        pub inner: MemoryStore,
        pub fail_loads: bool,
        pub fail_saves: bool,
    }

    impl FlakyStore {
        pub fn failing_saves() -> Self {
            Self {
                fail_saves: true,
                ..Self::default()
            }
        }

        pub fn failing_loads() -> Self {
            Self {
                fail_loads: true,
                ..Self::default()
            }
        }
    }

    impl KeyValueStore for FlakyStore {
        fn load(&self, key: &str) -> PersistenceResult<Option<String>> {
            if self.fail_loads {
                return Err(PersistenceError::StorageError("disk unavailable".to_string()));
            }
            self.inner.load(key)
        }

        fn save(&self, key: &str, value: &str) -> PersistenceResult<()> {
            if self.fail_saves {
                return Err(PersistenceError::StorageError("quota exceeded".to_string()));
            }
            self.inner.save(key, value)
        }
    }
}
