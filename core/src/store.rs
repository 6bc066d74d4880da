//! The local, ordered cache of the remote collection.
//!
//! `TodoList` only ever changes by applying a server-confirmed result. Each
//! `apply_*` touches the entries for one id and nothing else, so results of
//! concurrent requests can be applied in whatever order they arrive.

use crate::types::{TodoId, TodoItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TodoItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Replace everything with a freshly fetched collection.
    pub fn apply_loaded(&mut self, items: Vec<TodoItem>) {
        self.items = items;
    }

    /// Append a newly created item at the end.
    pub fn apply_created(&mut self, item: TodoItem) {
        self.items.push(item);
    }

    /// Swap every entry whose id is `id` for `item`. Returns whether any
    /// entry matched; a result for an id that has since been removed is
    /// dropped.
    pub fn apply_replaced(&mut self, id: &TodoId, item: TodoItem) -> bool {
        let mut matched = false;
        for slot in self.items.iter_mut().filter(|slot| &slot.id == id) {
            *slot = item.clone();
            matched = true;
        }
        matched
    }

    /// Drop every entry whose id is `id`, keeping the rest in order.
    /// Returns the number of entries removed.
    pub fn apply_removed(&mut self, id: &TodoId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        before - self.items.len()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
