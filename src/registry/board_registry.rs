use crate::{
    config::BoardSettings,
    domain::{Board, BoardId},
    error::PersistenceResult,
    registry::persist,
    storage::{KeyValueStore, BOARDS_KEY},
};
use std::sync::Arc;

/// Owns the collection of boards.
///
/// The collection is never empty: loading an empty or unreadable store and
/// deleting the last board both install the default board.
pub struct BoardRegistry {
    store: Arc<dyn KeyValueStore>,
    settings: BoardSettings,
    boards: Vec<Board>,
    dropdown_open: Option<BoardId>,
}

impl BoardRegistry {
    /// Restores the boards from `store`, bootstrapping the default board if needed
    pub fn load(store: Arc<dyn KeyValueStore>, settings: &BoardSettings) -> Self {
        let stored = match read_boards(store.as_ref()) {
            Ok(boards) => boards,
            Err(e) => {
                tracing::error!("Failed to read stored boards: {}", e);
                Vec::new()
            }
        };

        let mut registry = Self {
            store,
            settings: settings.clone(),
            boards: stored,
            dropdown_open: None,
        };

        if registry.boards.is_empty() {
            tracing::info!("No boards found, creating default board");
            registry.install_default_board();
        }

        registry
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// Board whose menu is currently open, if any
    pub fn dropdown_open(&self) -> Option<BoardId> {
        self.dropdown_open
    }

    /// Highest board id in use, 0 when there are no boards
    pub fn highest_board_id(&self) -> BoardId {
        self.boards
            .iter()
            .map(|board| board.id)
            .max()
            .unwrap_or(BoardId::new(0))
    }

    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    /// Id the next added board will receive, `None` when no higher id exists
    pub fn next_board_id(&self) -> Option<BoardId> {
        self.highest_board_id().next()
    }

    pub fn find_board_by_id(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id == id)
    }

    /// Appends an untitled board and returns its id.
    ///
    /// Returns `None` without touching the collection when a stored board
    /// already holds the largest possible id.
    pub fn add_board(&mut self) -> Option<BoardId> {
        let Some(id) = self.next_board_id() else {
            tracing::error!(
                "Cannot add board: highest id {} is already in use",
                self.highest_board_id()
            );
            return None;
        };
        self.boards.push(Board::new(id));
        self.save_boards();
        Some(id)
    }

    /// Removes a board; lists that reference it are left alone
    pub fn delete_board(&mut self, id: BoardId) {
        let before = self.boards.len();
        self.boards.retain(|board| board.id != id);
        if self.boards.len() == before {
            return;
        }

        if self.boards.is_empty() {
            tracing::info!("Last board deleted, recreating default board");
            self.install_default_board();
        } else {
            self.save_boards();
        }
    }

    pub fn update_board_title(&mut self, id: BoardId, title: &str) {
        let error_message = self.settings.empty_title_error.clone();
        if let Some(board) = self.board_mut(id) {
            board.set_title(title, &error_message);
            self.save_boards();
        }
    }

    pub fn update_board_description(&mut self, id: BoardId, description: &str) {
        if let Some(board) = self.board_mut(id) {
            board.set_description(description);
            self.save_boards();
        }
    }

    pub fn toggle_favorite(&mut self, id: BoardId) {
        if let Some(board) = self.board_mut(id) {
            board.toggle_favorite();
            self.save_boards();
        }
    }

    /// Opens the menu of `id`, or closes it when it is already open. Not persisted.
    pub fn toggle_dropdown(&mut self, id: BoardId) {
        self.dropdown_open = if self.dropdown_open == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    /// Replaces the whole collection, e.g. after the boards were reordered
    pub fn update_boards(&mut self, boards: Vec<Board>) {
        if boards.is_empty() {
            tracing::warn!("Ignoring empty board collection, keeping default board");
            self.boards.clear();
            self.install_default_board();
            return;
        }

        self.boards = boards;
        self.save_boards();
    }

    /// Writes the collection to the store; failures are logged only
    pub fn save_boards(&self) {
        persist(self.store.as_ref(), BOARDS_KEY, &self.boards);
    }

    fn board_mut(&mut self, id: BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|board| board.id == id)
    }

    fn install_default_board(&mut self) {
        self.boards = vec![Board::default_board(self.settings.default_title.as_str())];
        self.save_boards();
    }
}

fn read_boards(store: &dyn KeyValueStore) -> PersistenceResult<Vec<Board>> {
    let Some(json) = store.load(BOARDS_KEY)? else {
        return Ok(Vec::new());
    };
    // A stored `null` counts as no boards
    let boards: Option<Vec<Board>> = serde_json::from_str(&json)?;
    Ok(boards.unwrap_or_default())
}
