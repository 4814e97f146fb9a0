use crate::{
    error::{PersistenceError, PersistenceResult},
    storage::KeyValueStore,
};
use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// File-based storage keeping each key in its own JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const EXTENSION: &'static str = "json";

    /// Creates a FileStore rooted at `root`; the directory is created on first save
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root_path: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_path
    }

    fn key_file(&self, key: &str) -> PersistenceResult<PathBuf> {
        let usable = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !usable {
            return Err(PersistenceError::StorageError(format!(
                "invalid storage key '{}'",
                key
            )));
        }
        Ok(self
            .root_path
            .join(format!("{}.{}", key, Self::EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn load(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.key_file(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!("Read {} bytes from {}", contents.len(), path.display());
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let path = self.key_file(key)?;
        fs::create_dir_all(&self.root_path)?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut temp_file = NamedTempFile::new_in(&self.root_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(&path).map_err(|e| e.error)?;

        tracing::debug!("Atomically wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_loads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.load("boards").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.save("lists", r#"[{"id":"a"}]"#).unwrap();

        assert!(temp_dir.path().join("lists.json").exists());
        assert_eq!(
            store.load("lists").unwrap().as_deref(),
            Some(r#"[{"id":"a"}]"#)
        );
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.save("boards", "First").unwrap();
        store.save("boards", "Second").unwrap();

        assert_eq!(store.load("boards").unwrap().as_deref(), Some("Second"));
    }

    #[test]
    fn test_save_creates_root_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("data");
        let store = FileStore::new(&root);

        store.save("boards", "[]").unwrap();
        assert!(root.join("boards.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.save("../boards", "[]").is_err());
        assert!(store.load("").is_err());
    }
}
