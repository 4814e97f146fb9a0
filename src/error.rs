use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanbordError>;

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

/// Failure at the key-value storage boundary.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[cfg(feature = "sqlite-storage")]
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    StorageError(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Storage backend '{0}' is not enabled in this build")]
    UnsupportedBackend(String),
}

#[derive(Debug, Error)]
pub enum PlanbordError {
    #[error(transparent)]
    PersistenceError(#[from] PersistenceError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}
