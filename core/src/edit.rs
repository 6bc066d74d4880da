//! Form state for adding and editing todos.
//!
//! # Design
//! There is one form and one edit slot. While the slot is `Idle` the form
//! holds the next todo to create; `Editing` carries a snapshot of the item
//! being edited and the form holds its pending values. The edit dialog is
//! open exactly when the slot is `Editing`, so there is no separate flag to
//! keep in sync.

use crate::types::{
    join_tags, parse_tags, TodoChanges, TodoDraft, TodoId, TodoItem, DEFAULT_PRIORITY,
};

/// Today's date in UTC as `YYYY-MM-DD`, the default for both date fields.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Which todo, if any, the form is currently editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSlot {
    #[default]
    Idle,
    Editing(TodoItem),
}

impl EditSlot {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditSlot::Editing(_))
    }

    pub fn target(&self) -> Option<&TodoItem> {
        match self {
            EditSlot::Idle => None,
            EditSlot::Editing(item) => Some(item),
        }
    }

    pub fn target_id(&self) -> Option<&TodoId> {
        self.target().map(|item| &item.id)
    }
}

/// Field values of the add/edit form. Tags are kept as typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoForm {
    pub title: String,
    pub priority: i64,
    pub date: String,
    pub due_date: String,
    pub tags: String,
}

impl TodoForm {
    /// Empty title and tags, default priority, both dates set to `today`.
    pub fn blank(today: &str) -> Self {
        Self {
            title: String::new(),
            priority: DEFAULT_PRIORITY,
            date: today.to_string(),
            due_date: today.to_string(),
            tags: String::new(),
        }
    }

    /// Pre-populate from an existing item.
    pub fn from_item(item: &TodoItem) -> Self {
        Self {
            title: item.title.clone(),
            priority: item.priority,
            date: item.date.clone(),
            due_date: item.due_date.clone(),
            tags: join_tags(&item.tags),
        }
    }

    pub fn to_draft(&self) -> TodoDraft {
        TodoDraft {
            title: self.title.clone(),
            priority: self.priority,
            date: self.date.clone(),
            due_date: self.due_date.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Every form field as a change; completion state is left alone.
    pub fn to_changes(&self) -> TodoChanges {
        TodoChanges {
            title: Some(self.title.clone()),
            completed: None,
            priority: Some(self.priority),
            date: Some(self.date.clone()),
            due_date: Some(self.due_date.clone()),
            tags: Some(parse_tags(&self.tags)),
        }
    }
}
