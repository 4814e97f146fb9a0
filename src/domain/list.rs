use crate::domain::{
    board::BoardId,
    card::{Card, CardId},
    deadline::is_expired,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Color given to lists that have none
pub const DEFAULT_LIST_COLOR: &str = "#ffffff";

/// Random list identifier; stays the same when the list moves between boards
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Generates a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ListId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for ListId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ListId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A column on a board holding an ordered sequence of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub board_id: BoardId,
    pub title: String,
    pub color: String,
    pub deadline: Option<DateTime<Utc>>,
    pub is_expired: bool,
    pub cards: Vec<Card>,
}

impl List {
    pub fn new(board_id: BoardId, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: ListId::new(),
            board_id,
            title: title.into(),
            color: color.into(),
            deadline: None,
            is_expired: false,
            cards: Vec::new(),
        }
    }

    pub fn set_deadline(&mut self, deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) {
        self.deadline = deadline;
        self.refresh_expiry(now);
    }

    pub fn refresh_expiry(&mut self, now: DateTime<Utc>) {
        self.is_expired = is_expired(self.deadline, now);
    }

    /// Recomputes the expiry flag of the list and every card in it
    pub fn refresh_all_expiry(&mut self, now: DateTime<Utc>) {
        self.refresh_expiry(now);
        for card in &mut self.cards {
            card.refresh_expiry(now);
        }
    }

    pub fn find_card(&self, card_id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == card_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_list_creation() {
        let list = List::new(BoardId::new(2), "Todo", DEFAULT_LIST_COLOR);

        assert_eq!(list.board_id.value(), 2);
        assert_eq!(list.title, "Todo");
        assert_eq!(list.color, "#ffffff");
        assert!(list.deadline.is_none());
        assert!(!list.is_expired);
        assert!(list.cards.is_empty());
    }

    #[test]
    fn test_refresh_all_expiry() {
        let now = Utc::now();
        let mut list = List::new(BoardId::new(1), "Doing", DEFAULT_LIST_COLOR);
        list.deadline = Some(now - Duration::minutes(5));

        let mut late = Card::new("late");
        late.deadline = Some(now - Duration::days(2));
        let mut early = Card::new("early");
        early.deadline = Some(now + Duration::days(2));
        early.is_expired = true;
        list.cards = vec![late, early];

        list.refresh_all_expiry(now);

        assert!(list.is_expired);
        assert!(list.cards[0].is_expired);
        assert!(!list.cards[1].is_expired);
    }

    #[test]
    fn test_list_json_shape() {
        let list = List::new(BoardId::new(7), "Done", "#00ff00");
        let json = serde_json::to_value(&list).unwrap();

        assert_eq!(json["boardId"], 7);
        assert_eq!(json["color"], "#00ff00");
        assert_eq!(json["isExpired"], false);
        assert!(json["cards"].as_array().unwrap().is_empty());
    }
}
