//! Defaulting of stored list records.
//!
//! Stored lists may come from older versions of the app that did not write
//! every field, or wrote ids as numbers. These functions rebuild a complete
//! record from whatever is present and never fail on a missing optional field.

use crate::domain::{
    board::BoardId,
    card::{Card, CardId},
    deadline::parse_deadline,
    list::{List, ListId},
};
use serde_json::Value;

/// Rebuilds a list from a stored record, filling in defaults.
///
/// Returns `None` when the record has no usable `id` or `boardId`, since such
/// a list could never be addressed or shown on a board.
pub fn normalize_list(raw: &Value, default_color: &str) -> Option<List> {
    let record = raw.as_object()?;
    let id = record.get("id").and_then(read_id)?;
    let board_id = record.get("boardId").and_then(read_board_id)?;

    let color = record
        .get("color")
        .and_then(Value::as_str)
        .filter(|color| !color.is_empty())
        .unwrap_or(default_color)
        .to_string();

    let cards = record
        .get("cards")
        .and_then(Value::as_array)
        .map(|cards| cards.iter().filter_map(normalize_card).collect())
        .unwrap_or_default();

    Some(List {
        id: ListId::from(id),
        board_id,
        title: read_title(record.get("title")),
        color,
        deadline: record.get("deadline").and_then(parse_deadline),
        is_expired: read_flag(record.get("isExpired")),
        cards,
    })
}

/// Rebuilds a card from a stored record; `None` when it has no usable `id`
pub fn normalize_card(raw: &Value) -> Option<Card> {
    let record = raw.as_object()?;
    let id = record.get("id").and_then(read_id)?;

    Some(Card {
        id: CardId::from(id),
        title: read_title(record.get("title")),
        deadline: record.get("deadline").and_then(parse_deadline),
        is_expired: read_flag(record.get("isExpired")),
    })
}

fn read_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // Early versions numbered lists and cards sequentially
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn read_board_id(value: &Value) -> Option<BoardId> {
    match value {
        Value::Number(n) => n.as_u64().map(BoardId::new),
        // Route parameters arrive as strings
        Value::String(s) => s.trim().parse::<u64>().ok().map(BoardId::new),
        _ => None,
    }
}

fn read_title(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

fn read_flag(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}
