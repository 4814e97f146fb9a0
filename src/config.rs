use crate::{
    domain::{DEFAULT_BOARD_TITLE, DEFAULT_LIST_COLOR, EMPTY_TITLE_ERROR},
    error::ConfigError,
};
use serde::{Deserialize, Serialize};
use std::{fs, io::ErrorKind, path::Path};

/// Name of the settings file inside a data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Where the key-value data lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub sqlite_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            sqlite_file: "planbord.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Title of the board created when none exist
    pub default_title: String,
    /// Message attached to boards with an empty title
    pub empty_title_error: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_BOARD_TITLE.to_string(),
            empty_title_error: EMPTY_TITLE_ERROR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    pub default_color: String,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_LIST_COLOR.to_string(),
        }
    }
}

/// Settings read from `config.toml`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub board: BoardSettings,
    pub list: ListSettings,
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when the file does not exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}
