use crate::{
    config::ListSettings,
    domain::{normalize_list, BoardId, Card, CardId, List, ListId},
    error::PersistenceResult,
    registry::persist,
    storage::{KeyValueStore, LISTS_KEY},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{collections::HashSet, mem, sync::Arc};

/// Owns all lists and, through them, all cards.
///
/// Lists of every board live in one ordered collection. Operations that touch
/// a board's lists keep that board's lists next to each other; the position of
/// the group within the collection is not part of the contract.
pub struct ListRegistry {
    store: Arc<dyn KeyValueStore>,
    settings: ListSettings,
    lists: Vec<List>,
}

impl ListRegistry {
    /// Creates an empty registry; call [`ListRegistry::load_lists`] to restore stored lists
    pub fn new(store: Arc<dyn KeyValueStore>, settings: &ListSettings) -> Self {
        Self {
            store,
            settings: settings.clone(),
            lists: Vec::new(),
        }
    }

    /// Creates a registry and restores the stored lists
    pub fn load(store: Arc<dyn KeyValueStore>, settings: &ListSettings) -> Self {
        let mut registry = Self::new(store, settings);
        registry.load_lists();
        registry
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn find_list_by_id(&self, list_id: &ListId) -> Option<&List> {
        self.lists.iter().find(|list| &list.id == list_id)
    }

    /// Lists of one board in collection order
    pub fn lists_by_board(&self, board_id: BoardId) -> Vec<&List> {
        self.lists
            .iter()
            .filter(|list| list.board_id == board_id)
            .collect()
    }

    pub fn add_list(&mut self, board_id: BoardId, title: impl Into<String>) -> ListId {
        let list = List::new(board_id, title, self.settings.default_color.as_str());
        let id = list.id.clone();
        self.lists.push(list);
        self.save_lists();
        id
    }

    /// Appends a card to a list; `None` when the list does not exist
    pub fn add_card(&mut self, list_id: &ListId, title: impl Into<String>) -> Option<CardId> {
        let list = self.list_mut(list_id)?;
        let card = Card::new(title);
        let id = card.id.clone();
        list.cards.push(card);
        self.save_lists();
        Some(id)
    }

    /// Replaces the cards of a list wholesale, e.g. after a drag and drop
    pub fn update_cards(&mut self, list_id: &ListId, cards: Vec<Card>) {
        if let Some(list) = self.list_mut(list_id) {
            list.cards = cards;
            self.save_lists();
        }
    }

    pub fn delete_card(&mut self, list_id: &ListId, card_id: &CardId) {
        if let Some(list) = self.list_mut(list_id) {
            let before = list.cards.len();
            list.cards.retain(|card| &card.id != card_id);
            if list.cards.len() != before {
                self.save_lists();
            }
        }
    }

    /// Moves a list to another board, placing it after that board's existing lists.
    ///
    /// The collection is rebuilt as: lists of unrelated boards, the remaining
    /// lists of the old board, the lists already on the new board, the moved list.
    pub fn update_list_board_id(&mut self, list_id: &ListId, new_board_id: BoardId) {
        let Some(index) = self.position(list_id) else {
            return;
        };

        let mut moved = self.lists.remove(index);
        let old_board_id = moved.board_id;
        moved.board_id = new_board_id;

        let (old_board, rest): (Vec<List>, Vec<List>) = mem::take(&mut self.lists)
            .into_iter()
            .partition(|list| list.board_id == old_board_id);
        let (new_board, mut lists): (Vec<List>, Vec<List>) = rest
            .into_iter()
            .partition(|list| list.board_id == new_board_id);

        lists.extend(old_board);
        lists.extend(new_board);
        lists.push(moved);
        self.lists = lists;

        self.save_lists();

        tracing::debug!(
            list_id = %list_id,
            from_board = %old_board_id,
            to_board = %new_board_id,
            total_lists = self.lists.len(),
            "List moved"
        );
    }

    pub fn update_list_deadline(&mut self, list_id: &ListId, deadline: Option<DateTime<Utc>>) {
        self.update_list_deadline_at(list_id, deadline, Utc::now());
    }

    /// Sets a list deadline, judging expiry against `now`
    pub fn update_list_deadline_at(
        &mut self,
        list_id: &ListId,
        deadline: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        if let Some(list) = self.list_mut(list_id) {
            list.set_deadline(deadline, now);
            self.save_lists();
        }
    }

    pub fn update_list_color(&mut self, list_id: &ListId, color: impl Into<String>) {
        if let Some(list) = self.list_mut(list_id) {
            list.color = color.into();
            self.save_lists();
        }
    }

    /// Removes a list and moves the remaining lists of its board after all other boards' lists
    pub fn delete_list(&mut self, list_id: &ListId) {
        let Some(index) = self.position(list_id) else {
            return;
        };

        let removed = self.lists.remove(index);
        let board_id = removed.board_id;

        let (board_lists, mut lists): (Vec<List>, Vec<List>) = mem::take(&mut self.lists)
            .into_iter()
            .partition(|list| list.board_id == board_id);
        lists.extend(board_lists);
        self.lists = lists;

        self.save_lists();

        tracing::debug!(
            list_id = %list_id,
            board_id = %board_id,
            remaining_lists = self.lists.len(),
            "List deleted"
        );
    }

    /// Moves the given lists, in the given order, to the end of the collection.
    ///
    /// Every stored list sharing an id with `ordered` is replaced by the
    /// version in `ordered`; all other lists keep their relative order.
    pub fn reorder_lists(&mut self, ordered: Vec<List>) {
        if ordered.is_empty() {
            return;
        }

        let ids: HashSet<&ListId> = ordered.iter().map(|list| &list.id).collect();
        self.lists.retain(|list| !ids.contains(&list.id));
        self.lists.extend(ordered);
        self.save_lists();
    }

    pub fn check_all_deadlines(&mut self) {
        self.check_all_deadlines_at(Utc::now());
    }

    /// Recomputes the expiry flag of every list and card against `now`
    pub fn check_all_deadlines_at(&mut self, now: DateTime<Utc>) {
        for list in &mut self.lists {
            list.refresh_all_expiry(now);
        }
        self.save_lists();
    }

    /// Restores lists from the store, defaulting missing fields.
    ///
    /// An absent key leaves the collection as it is; an unreadable or
    /// malformed payload resets it to empty.
    pub fn load_lists(&mut self) {
        match read_lists(self.store.as_ref(), &self.settings.default_color) {
            Ok(Some(lists)) => self.lists = lists,
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to load lists: {}", e);
                self.lists = Vec::new();
            }
        }
    }

    /// Writes the collection to the store; failures are logged only
    pub fn save_lists(&self) {
        persist(self.store.as_ref(), LISTS_KEY, &self.lists);
    }

    fn position(&self, list_id: &ListId) -> Option<usize> {
        self.lists.iter().position(|list| &list.id == list_id)
    }

    fn list_mut(&mut self, list_id: &ListId) -> Option<&mut List> {
        self.lists.iter_mut().find(|list| &list.id == list_id)
    }
}

fn read_lists(
    store: &dyn KeyValueStore,
    default_color: &str,
) -> PersistenceResult<Option<Vec<List>>> {
    let Some(json) = store.load(LISTS_KEY)? else {
        return Ok(None);
    };

    let records = match serde_json::from_str::<Value>(&json)? {
        Value::Array(records) => records,
        Value::Null => Vec::new(),
        other => {
            tracing::warn!("Stored lists are not an array: {}", other);
            return Ok(Some(Vec::new()));
        }
    };

    let total = records.len();
    let lists: Vec<List> = records
        .iter()
        .filter_map(|raw| normalize_list(raw, default_color))
        .collect();
    if lists.len() < total {
        tracing::warn!("Dropped {} stored lists without id or board", total - lists.len());
    }

    Ok(Some(lists))
}
