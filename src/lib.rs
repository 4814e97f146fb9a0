//! # Planbord Core
//!
//! Client-side state for planbord kanban boards.
//!
//! This crate keeps boards, lists and cards in memory, persists them as JSON
//! documents in a key-value store and exposes the mutations a UI needs. It has
//! no knowledge of rendering, routing or drag and drop; those layers call into
//! [`BoardRegistry`] and [`ListRegistry`].

pub mod config;
pub mod domain;
pub mod error;
pub mod registry;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Settings;
pub use domain::{Board, BoardId, Card, CardId, List, ListId};
pub use error::{PersistenceError, PlanbordError, Result};
pub use registry::{BoardRegistry, ListRegistry};
pub use session::Session;
pub use storage::{KeyValueStore, MemoryStore};
