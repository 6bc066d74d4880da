//! In-memory stand-in for the hosted todo collection.
//!
//! Mirrors how the hosted mock API behaves: ids are sequential decimal
//! strings, records keep insertion order, `PUT` replaces the whole record,
//! and `tags` is stored as whatever JSON the client sent.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: i64,
    pub date: String,
    pub due_date: String,
    pub tags: serde_json::Value,
}

/// Body of `POST /todos` and `PUT /todos/{id}`. Any `id` in the body is
/// ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub tags: serde_json::Value,
}

impl TodoInput {
    fn into_todo(self, id: String) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
            priority: self.priority,
            date: self.date,
            due_date: self.due_date,
            tags: self.tags,
        }
    }
}

fn default_priority() -> i64 {
    1
}

#[derive(Debug, Default)]
pub struct Store {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Store {
    fn with(todos: Vec<Todo>) -> Self {
        let next_id = todos
            .iter()
            .filter_map(|todo| todo.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self { todos, next_id }
    }

    fn assign_id(&mut self) -> String {
        let id = self.next_id.max(1);
        self.next_id = id.saturating_add(1);
        id.to_string()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router over a store seeded with `todos`, which may carry any JSON in
/// `tags`.
pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with(todos)));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(replace_todo).delete(delete_todo))
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, todos: Vec<Todo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(todos)).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.clone())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let todo = input.into_todo(store.assign_id());
    tracing::info!(id = %todo.id, "created todo");
    store.todos.push(todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn replace_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let index = store.position(&id).ok_or(StatusCode::NOT_FOUND)?;
    let todo = input.into_todo(id);
    store.todos[index] = todo.clone();
    tracing::info!(id = %todo.id, "replaced todo");
    Ok(Json(todo))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let index = store.position(&id).ok_or(StatusCode::NOT_FOUND)?;
    let removed = store.todos.remove(index);
    tracing::info!(id = %removed.id, "deleted todo");
    Ok(Json(removed))
}
