use crate::domain::deadline::is_expired;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Random card identifier, unique across all lists
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Generates a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A work item inside a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub deadline: Option<DateTime<Utc>>,
    pub is_expired: bool,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: CardId::new(),
            title: title.into(),
            deadline: None,
            is_expired: false,
        }
    }

    pub fn set_deadline(&mut self, deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) {
        self.deadline = deadline;
        self.refresh_expiry(now);
    }

    pub fn refresh_expiry(&mut self, now: DateTime<Utc>) {
        self.is_expired = is_expired(self.deadline, now);
    }
}
