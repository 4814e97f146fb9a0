use serde::{Deserialize, Serialize};
use std::fmt;

/// Title given to the board that is created when no boards exist
pub const DEFAULT_BOARD_TITLE: &str = "Eerste Bord";

/// Message stored on a board whose title is empty after trimming
pub const EMPTY_TITLE_ERROR: &str = "Titel mag niet leeg zijn.";

/// Sequential board identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(u64);

impl BoardId {
    /// Id of the bootstrap board
    pub const FIRST: BoardId = BoardId(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one, `None` once the id space is used up
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for BoardId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_valid() -> bool {
    true
}

/// A kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub description: String,
}

impl Board {
    /// Creates an untitled board
    pub fn new(id: BoardId) -> Self {
        Self {
            id,
            title: String::new(),
            valid: true,
            error: String::new(),
            is_favorite: false,
            description: String::new(),
        }
    }

    /// Creates the bootstrap board with id 1
    pub fn default_board(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::new(BoardId::FIRST)
        }
    }

    /// Stores the trimmed title and records whether it is valid.
    ///
    /// An empty title is not rejected: the board keeps it and is flagged
    /// with `error_message` until a non-empty title is set.
    pub fn set_title(&mut self, title: &str, error_message: &str) {
        self.title = title.trim().to_string();
        self.valid = validate_title(title);
        self.error = if self.valid {
            String::new()
        } else {
            error_message.to_string()
        };
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}

/// A title is valid when it has content besides whitespace
pub fn validate_title(title: &str) -> bool {
    !title.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(BoardId::new(4));
        assert_eq!(board.id.value(), 4);
        assert!(board.title.is_empty());
        assert!(board.valid);
        assert!(board.error.is_empty());
        assert!(!board.is_favorite);
    }

    #[test]
    fn test_next_id() {
        assert_eq!(BoardId::new(4).next(), Some(BoardId::new(5)));
        assert_eq!(BoardId::new(u64::MAX).next(), None);
    }

    #[test]
    fn test_default_board() {
        let board = Board::default_board(DEFAULT_BOARD_TITLE);
        assert_eq!(board.id, BoardId::FIRST);
        assert_eq!(board.title, "Eerste Bord");
        assert!(board.valid);
    }

    #[test]
    fn test_set_title_trims() {
        let mut board = Board::new(BoardId::new(1));
        board.set_title(" Plan ", EMPTY_TITLE_ERROR);

        assert_eq!(board.title, "Plan");
        assert!(board.valid);
        assert_eq!(board.error, "");
    }

    #[test]
    fn test_set_title_whitespace_is_invalid() {
        let mut board = Board::new(BoardId::new(1));
        board.set_title("   ", EMPTY_TITLE_ERROR);

        assert_eq!(board.title, "");
        assert!(!board.valid);
        assert_eq!(board.error, EMPTY_TITLE_ERROR);

        // Fixing the title clears the error again
        board.set_title("Sprint", EMPTY_TITLE_ERROR);
        assert!(board.valid);
        assert!(board.error.is_empty());
    }

    #[test]
    fn test_toggle_favorite() {
        let mut board = Board::new(BoardId::new(1));
        board.toggle_favorite();
        assert!(board.is_favorite);
        board.toggle_favorite();
        assert!(!board.is_favorite);
    }

    #[test]
    fn test_board_json_shape() {
        let board = Board::default_board(DEFAULT_BOARD_TITLE);
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["title"], "Eerste Bord");
    }

    #[test]
    fn test_board_missing_optional_fields() {
        let board: Board = serde_json::from_str(r#"{"id": 3, "title": "Oud"}"#).unwrap();
        assert_eq!(board.id.value(), 3);
        assert!(board.valid);
        assert!(board.description.is_empty());
    }
}
