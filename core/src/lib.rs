//! Client core for a todo list mirrored to a remote REST collection.
//!
//! # Overview
//! The remote service at `{base_url}/todos` is authoritative: it assigns ids
//! and persists records. This crate keeps a local ordered copy of the
//! collection and changes it only with what the service sends back.
//!
//! # Design
//! - `TodoClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO).
//! - `RemoteTodos` is the list/create/replace/delete capability;
//!   `HttpRemote` implements it with `ureq`, tests use in-memory fakes.
//! - `TodoApp` owns the `TodoList`, the `TodoForm` and the `EditSlot`, and
//!   funnels every mutation through one remote round trip.
//! - Failures are logged with `tracing` and returned; local state is never
//!   left half-updated.

pub mod app;
pub mod client;
pub mod edit;
pub mod error;
pub mod http;
pub mod remote;
pub mod store;
pub mod types;

pub use app::TodoApp;
pub use client::TodoClient;
pub use edit::{today, EditSlot, TodoForm};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use remote::{HttpRemote, RemoteTodos};
pub use store::TodoList;
pub use types::{
    join_tags, parse_tags, NewTodo, TodoChanges, TodoDraft, TodoId, TodoItem, DEFAULT_PRIORITY,
    MAX_PRIORITY,
};
