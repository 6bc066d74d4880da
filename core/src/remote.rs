//! The remote collection as a capability: list, create, replace, delete.
//!
//! # Design
//! `TodoApp` talks to the collection only through `RemoteTodos`, so tests
//! substitute an in-memory fake and a host with its own runtime can supply
//! its own transport. `HttpRemote` is the stock implementation: it pairs the
//! I/O-free `TodoClient` with a blocking `ureq` agent.
//!
//! Methods take `&self`. Several requests may be in flight at once from
//! different threads; callers apply each result to their `TodoList` as it
//! arrives.

use std::sync::Arc;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodo, TodoId, TodoItem};

/// Remote store for todo items. Authoritative for ids and persistence.
pub trait RemoteTodos {
    /// Fetch the whole collection.
    fn list(&self) -> Result<Vec<TodoItem>, ApiError>;

    /// Create a record; the returned item carries the assigned id.
    fn create(&self, todo: &NewTodo) -> Result<TodoItem, ApiError>;

    /// Replace the record at `todo.id` with `todo`, returning the stored
    /// representation.
    fn replace(&self, todo: &TodoItem) -> Result<TodoItem, ApiError>;

    fn delete(&self, id: &TodoId) -> Result<(), ApiError>;
}

impl<R: RemoteTodos + ?Sized> RemoteTodos for &R {
    fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        (**self).list()
    }

    fn create(&self, todo: &NewTodo) -> Result<TodoItem, ApiError> {
        (**self).create(todo)
    }

    fn replace(&self, todo: &TodoItem) -> Result<TodoItem, ApiError> {
        (**self).replace(todo)
    }

    fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        (**self).delete(id)
    }
}

impl<R: RemoteTodos + ?Sized> RemoteTodos for Arc<R> {
    fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        (**self).list()
    }

    fn create(&self, todo: &NewTodo) -> Result<TodoItem, ApiError> {
        (**self).create(todo)
    }

    fn replace(&self, todo: &TodoItem) -> Result<TodoItem, ApiError> {
        (**self).replace(todo)
    }

    fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        (**self).delete(id)
    }
}

/// `RemoteTodos` over HTTP using a blocking `ureq` agent.
///
/// HTTP statuses are returned as data rather than transport errors, so the
/// status mapping in `TodoClient::parse_*` is the only place that decides
/// what counts as failure. No timeout is configured beyond ureq's defaults.
#[derive(Clone)]
pub struct HttpRemote {
    client: TodoClient,
    agent: ureq::Agent,
}

impl std::fmt::Debug for HttpRemote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRemote")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

impl HttpRemote {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            client: TodoClient::new(base_url),
            agent,
        }
    }

    /// Execute a plain-data request and collect the response.
    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = req.method.as_str(), url = %req.url, "sending request");

        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.url), &req.headers).call(),
            (HttpMethod::Delete, _) => {
                with_headers(self.agent.delete(&req.url), &req.headers).call()
            }
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                with_headers(self.agent.post(&req.url), &req.headers).send_empty()
            }
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => {
                with_headers(self.agent.put(&req.url), &req.headers).send_empty()
            }
        };
        let mut response = result.map_err(|e| ApiError::TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;

        tracing::debug!(status, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl RemoteTodos for HttpRemote {
    fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        let req = self.client.build_list_todos();
        self.client.parse_list_todos(self.execute(req)?)
    }

    fn create(&self, todo: &NewTodo) -> Result<TodoItem, ApiError> {
        let req = self.client.build_create_todo(todo)?;
        self.client.parse_create_todo(self.execute(req)?)
    }

    fn replace(&self, todo: &TodoItem) -> Result<TodoItem, ApiError> {
        let req = self.client.build_replace_todo(todo)?;
        self.client.parse_replace_todo(self.execute(req)?)
    }

    fn delete(&self, id: &TodoId) -> Result<(), ApiError> {
        let req = self.client.build_delete_todo(id);
        self.client.parse_delete_todo(self.execute(req)?)
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
