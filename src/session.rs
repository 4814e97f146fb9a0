use crate::{
    config::{Settings, StorageBackend, StorageSettings, CONFIG_FILE},
    error::Result,
    registry::{BoardRegistry, ListRegistry},
    storage::KeyValueStore,
};
use std::{path::Path, sync::Arc};

/// Both registries of one running app, backed by a single store.
///
/// The registries do not call each other; lists refer to boards by id only.
pub struct Session {
    pub boards: BoardRegistry,
    pub lists: ListRegistry,
}

impl Session {
    /// Opens the data directory at `root`, honoring its `config.toml`
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let settings = Settings::load(root.join(CONFIG_FILE))?;
        let store = open_store(root, &settings.storage)?;

        tracing::info!(
            "Opened {:?} storage at {}",
            settings.storage.backend,
            root.display()
        );

        Ok(Self::with_store(store, &settings))
    }

    /// Builds a session over an already constructed store
    pub fn with_store(store: Arc<dyn KeyValueStore>, settings: &Settings) -> Self {
        Self {
            boards: BoardRegistry::load(Arc::clone(&store), &settings.board),
            lists: ListRegistry::load(store, &settings.list),
        }
    }
}

fn open_store(root: &Path, storage: &StorageSettings) -> Result<Arc<dyn KeyValueStore>> {
    match storage.backend {
        StorageBackend::File => file_store(root),
        StorageBackend::Sqlite => sqlite_store(&root.join(&storage.sqlite_file)),
    }
}

#[cfg(feature = "file-storage")]
fn file_store(root: &Path) -> Result<Arc<dyn KeyValueStore>> {
    Ok(Arc::new(crate::storage::FileStore::new(root)))
}

#[cfg(not(feature = "file-storage"))]
fn file_store(_root: &Path) -> Result<Arc<dyn KeyValueStore>> {
    Err(crate::error::ConfigError::UnsupportedBackend("file".to_string()).into())
}

#[cfg(feature = "sqlite-storage")]
fn sqlite_store(database_path: &Path) -> Result<Arc<dyn KeyValueStore>> {
    if let Some(parent) = database_path.parent() {
        std::fs::create_dir_all(parent).map_err(crate::error::PersistenceError::from)?;
    }
    Ok(Arc::new(crate::storage::SqliteStore::open(database_path)?))
}

#[cfg(not(feature = "sqlite-storage"))]
fn sqlite_store(_database_path: &Path) -> Result<Arc<dyn KeyValueStore>> {
    Err(crate::error::ConfigError::UnsupportedBackend("sqlite".to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::BoardId,
        storage::{MemoryStore, BOARDS_KEY, LISTS_KEY},
    };

    #[test]
    fn test_session_shares_one_store() {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::with_store(store.clone(), &Settings::default());

        let board = session.boards.add_board().unwrap();
        session.lists.add_list(board, "Todo");

        assert!(store.get_raw(BOARDS_KEY).is_some());
        assert!(store.get_raw(LISTS_KEY).is_some());
    }

    #[test]
    fn test_deleting_board_keeps_its_lists() {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::with_store(store.clone(), &Settings::default());

        let board = session.boards.add_board().unwrap();
        let list = session.lists.add_list(board, "Orphan");
        let stored_lists = store.get_raw(LISTS_KEY);

        session.boards.delete_board(board);

        assert!(session.boards.find_board_by_id(board).is_none());
        assert_eq!(
            session.lists.find_list_by_id(&list).unwrap().board_id,
            board
        );
        assert_eq!(session.lists.lists_by_board(board).len(), 1);
        assert_eq!(store.get_raw(LISTS_KEY), stored_lists);
    }

    #[test]
    fn test_default_board_after_deleting_everything() {
        let mut session = Session::with_store(Arc::new(MemoryStore::new()), &Settings::default());
        let list = session.lists.add_list(BoardId::FIRST, "Keeps board 1");

        session.boards.delete_board(BoardId::FIRST);

        assert_eq!(session.boards.board_count(), 1);
        assert_eq!(
            session.lists.find_list_by_id(&list).unwrap().board_id,
            BoardId::FIRST
        );
    }

    #[cfg(not(feature = "sqlite-storage"))]
    #[test]
    fn test_sqlite_backend_requires_feature() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE),
            "[storage]\nbackend = \"sqlite\"\n",
        )
        .unwrap();

        assert!(matches!(
            Session::open(temp_dir.path()),
            Err(crate::error::PlanbordError::ConfigError(
                crate::error::ConfigError::UnsupportedBackend(_)
            ))
        ));
    }
}
