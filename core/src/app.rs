//! Application state and the operations that mutate it.
//!
//! # Design
//! `TodoApp` owns the local list, the add/edit form and the edit slot, and
//! is the only thing that changes them. Every mutation is one remote round
//! trip followed by applying the server's answer; nothing is changed
//! locally before the server confirms. A failed operation is logged here
//! and returned, with state exactly as it was before the call. Retrying is
//! up to the caller.

use crate::edit::{today, EditSlot, TodoForm};
use crate::error::ApiError;
use crate::remote::RemoteTodos;
use crate::store::TodoList;
use crate::types::{TodoChanges, TodoDraft, TodoId, TodoItem};

pub struct TodoApp<R> {
    remote: R,
    todos: TodoList,
    form: TodoForm,
    edit: EditSlot,
    clock: fn() -> String,
}

impl<R: RemoteTodos> TodoApp<R> {
    pub fn new(remote: R) -> Self {
        Self::with_clock(remote, today)
    }

    /// Use `clock` instead of the system date when resetting the form.
    pub fn with_clock(remote: R, clock: fn() -> String) -> Self {
        Self {
            remote,
            todos: TodoList::new(),
            form: TodoForm::blank(&clock()),
            edit: EditSlot::Idle,
            clock,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub fn form(&self) -> &TodoForm {
        &self.form
    }

    /// Field edits never touch the network.
    pub fn form_mut(&mut self) -> &mut TodoForm {
        &mut self.form
    }

    pub fn edit_slot(&self) -> &EditSlot {
        &self.edit
    }

    pub fn is_modal_open(&self) -> bool {
        self.edit.is_editing()
    }

    /// Replace the local list with the remote collection.
    pub fn load_all(&mut self) -> Result<(), ApiError> {
        match self.remote.list() {
            Ok(items) => {
                tracing::debug!(count = items.len(), "loaded todos");
                self.todos.apply_loaded(items);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch todos");
                Err(e)
            }
        }
    }

    /// Create a todo from `draft` and append the server's record.
    pub fn create(&mut self, draft: TodoDraft) -> Result<TodoId, ApiError> {
        let new_todo = draft.into_new_todo();
        match self.remote.create(&new_todo) {
            Ok(item) => {
                tracing::debug!(id = %item.id, "created todo");
                let id = item.id.clone();
                self.todos.apply_created(item);
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, title = %new_todo.title, "failed to add todo");
                Err(e)
            }
        }
    }

    /// Send `changes` merged over the current item as a full replacement.
    pub fn update(&mut self, id: &TodoId, changes: &TodoChanges) -> Result<(), ApiError> {
        let replacement = match self.todos.get(id) {
            Some(current) => changes.apply_to(current),
            None => {
                let e = ApiError::UnknownTodo(id.clone());
                tracing::warn!(error = %e, "failed to update todo");
                return Err(e);
            }
        };
        self.replace(id, replacement)
    }

    pub fn toggle_complete(&mut self, id: &TodoId) -> Result<(), ApiError> {
        let Some(completed) = self.todos.get(id).map(|item| item.completed) else {
            let e = ApiError::UnknownTodo(id.clone());
            tracing::warn!(error = %e, "failed to toggle todo");
            return Err(e);
        };
        self.update(id, &TodoChanges::completed(!completed))
    }

    pub fn set_priority(&mut self, id: &TodoId, priority: i64) -> Result<(), ApiError> {
        self.update(id, &TodoChanges::priority(priority))
    }

    /// Delete remotely, then drop the local entry.
    pub fn remove(&mut self, id: &TodoId) -> Result<(), ApiError> {
        match self.remote.delete(id) {
            Ok(()) => {
                tracing::debug!(%id, "deleted todo");
                self.todos.apply_removed(id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "failed to delete todo");
                Err(e)
            }
        }
    }

    /// Put the todo with `id` in the edit slot and load it into the form.
    /// Replaces any edit already in progress.
    pub fn start_editing(&mut self, id: &TodoId) -> Result<(), ApiError> {
        let item = self
            .todos
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::UnknownTodo(id.clone()))?;
        if let Some(previous) = self.edit.target_id() {
            tracing::debug!(%previous, %id, "replacing edit target");
        }
        self.form = TodoForm::from_item(&item);
        self.edit = EditSlot::Editing(item);
        Ok(())
    }

    /// Abandon the current edit, if any, and clear the form.
    pub fn cancel_editing(&mut self) {
        self.reset_form();
    }

    /// Save the form: create a new todo when idle, replace the edited todo
    /// otherwise. The form is reset only on success.
    pub fn submit(&mut self) -> Result<TodoId, ApiError> {
        let id = match self.edit.target().cloned() {
            None => {
                let draft = self.form.to_draft();
                self.create(draft)?
            }
            Some(target) => {
                let replacement = self.form.to_changes().apply_to(&target);
                self.replace(&target.id, replacement)?;
                target.id
            }
        };
        self.reset_form();
        Ok(id)
    }

    fn replace(&mut self, id: &TodoId, replacement: TodoItem) -> Result<(), ApiError> {
        match self.remote.replace(&replacement) {
            Ok(item) => {
                tracing::debug!(%id, "updated todo");
                self.todos.apply_replaced(id, item);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, %id, "failed to update todo");
                Err(e)
            }
        }
    }

    fn reset_form(&mut self) {
        self.edit = EditSlot::Idle;
        self.form = TodoForm::blank(&(self.clock)());
    }
}
