//! Error types for the todo store client.
//!
//! # Design
//! Every failure means the same thing to the caller: the operation did not
//! happen and local state is untouched. The variants exist for diagnostics
//! (what ends up in the log line), not for recovery branching. `NotFound`
//! keeps its own variant because it is the common stale-cache case.

use std::fmt;

use crate::types::TodoId;

/// Errors returned by `TodoClient` parse methods, `RemoteTodos`
/// implementations and `TodoApp` operations.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404: the todo no longer exists remotely.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),

    /// The request never produced a response (connection refused, DNS,
    /// reset, unreadable body).
    TransportError(String),

    /// The id is not in the local list, so no request was sent.
    UnknownTodo(TodoId),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "resource not found"),
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::TransportError(msg) => write!(f, "request failed: {msg}"),
            ApiError::UnknownTodo(id) => write!(f, "no todo with id {id}"),
        }
    }
}

impl std::error::Error for ApiError {}
