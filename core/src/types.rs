//! Domain types for the todo collection.
//!
//! # Design
//! `TodoItem` is the wire shape of a record in the remote collection
//! (camelCase keys, `dueDate`). The remote service is schemaless, so
//! deserialization is lenient: only `id` is required, and `tags` is always
//! normalized to a list no matter what the service returns for it.
//!
//! `TodoDraft` and `TodoChanges` describe what the presentation layer hands
//! to the controller; they are converted into full request bodies
//! (`NewTodo`, or a merged `TodoItem`) before anything hits the network.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Priority assigned to drafts and blank forms.
pub const DEFAULT_PRIORITY: i64 = 1;

/// Highest priority the presentation layer offers. Not enforced on data:
/// records loaded from the collection keep whatever integer they carry.
pub const MAX_PRIORITY: i64 = 3;

/// Opaque identifier assigned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TodoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single todo item as stored by the remote collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default = "default_priority", deserialize_with = "deserialize_priority")]
    pub priority: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub due_date: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

/// Body of a create request: every field except `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub priority: i64,
    pub date: String,
    pub due_date: String,
    pub tags: Vec<String>,
}

/// User input for a new todo, with tags still in their raw comma-separated
/// form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub priority: i64,
    pub date: String,
    pub due_date: String,
    pub tags: String,
}

impl TodoDraft {
    /// Build the create request body. New todos always start incomplete.
    pub fn into_new_todo(self) -> NewTodo {
        NewTodo {
            tags: parse_tags(&self.tags),
            title: self.title,
            completed: false,
            priority: self.priority,
            date: self.date,
            due_date: self.due_date,
        }
    }
}

/// Field-level changes to an existing todo. `None` keeps the current value.
///
/// The remote store only supports full replacement, so changes are merged
/// over the current item with [`TodoChanges::apply_to`] and the result is
/// sent whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<i64>,
    pub date: Option<String>,
    pub due_date: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TodoChanges {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn priority(priority: i64) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Produce the full replacement record for `item`. The id is never
    /// changed.
    pub fn apply_to(&self, item: &TodoItem) -> TodoItem {
        TodoItem {
            id: item.id.clone(),
            title: self.title.clone().unwrap_or_else(|| item.title.clone()),
            completed: self.completed.unwrap_or(item.completed),
            priority: self.priority.unwrap_or(item.priority),
            date: self.date.clone().unwrap_or_else(|| item.date.clone()),
            due_date: self.due_date.clone().unwrap_or_else(|| item.due_date.clone()),
            tags: self.tags.clone().unwrap_or_else(|| item.tags.clone()),
        }
    }
}

/// Split a comma-separated tag string, trimming each tag.
///
/// Empty pieces are kept, so `""` yields a single empty tag. Records already
/// stored remotely were written this way.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(|tag| tag.trim().to_string()).collect()
}

/// Render tags for a text field, the inverse of [`parse_tags`] up to
/// whitespace.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

/// An explicit `null` reads the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_priority<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(DEFAULT_PRIORITY))
}

/// Accept any JSON value for `tags`. Lists keep their string elements;
/// anything else becomes an empty list.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
