use crate::error::PersistenceResult;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStore;
pub use memory_storage::MemoryStore;
#[cfg(feature = "sqlite-storage")]
pub use sqlite_storage::SqliteStore;

/// Key under which the board collection is stored
pub const BOARDS_KEY: &str = "boards";

/// Key under which the list collection (with nested cards) is stored
pub const LISTS_KEY: &str = "lists";

/// Durable key-value storage holding one JSON document per key.
///
/// Every save rewrites the full value; there are no partial updates.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, `None` if nothing was ever saved
    fn load(&self, key: &str) -> PersistenceResult<Option<String>>;

    /// Replaces the value stored under `key`
    fn save(&self, key: &str, value: &str) -> PersistenceResult<()>;
}
