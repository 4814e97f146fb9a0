pub mod board;
pub mod card;
pub mod deadline;
pub mod list;
pub mod normalize;

pub use board::{validate_title, Board, BoardId, DEFAULT_BOARD_TITLE, EMPTY_TITLE_ERROR};
pub use card::{Card, CardId};
pub use deadline::{is_expired, parse_deadline};
pub use list::{List, ListId, DEFAULT_LIST_COLOR};
pub use normalize::{normalize_card, normalize_list};
