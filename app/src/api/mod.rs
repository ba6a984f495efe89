//! Remote store adapter.
//!
//! The todo collection lives behind a small REST API keyed by todo id and
//! scoped to one user. [`TodoApi`] is the seam the reducer talks to:
//!
//! - [`HttpTodoApi`] (production): JSON over HTTP with `reqwest`
//! - [`InMemoryTodoApi`] (testing): deterministic in-process collection with
//!   failure injection
//!
//! # Dyn Compatibility
//!
//! Methods return boxed futures instead of using `async fn` so the client can
//! be held as `Arc<dyn TodoApi>` and captured by effects.

use crate::types::{Todo, TodoId, UserId};
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

pub mod http;
pub mod memory;

pub use http::HttpTodoApi;
pub use memory::InMemoryTodoApi;

/// Boxed future returned by [`TodoApi`] methods
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Errors that can occur when talking to the todo API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or no response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The response body could not be decoded
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// The server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The todo does not exist
    #[error("Todo {0} not found")]
    NotFound(TodoId),
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    /// Owner
    pub user_id: UserId,
    /// Trimmed title
    pub title: String,
    /// Always false for new todos
    pub completed: bool,
}

impl NewTodo {
    /// A new, incomplete todo
    #[must_use]
    pub const fn new(user_id: UserId, title: String) -> Self {
        Self {
            user_id,
            title,
            completed: false,
        }
    }
}

/// Operation kinds, used to log calls and to inject failures in tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    /// `list`
    List,
    /// `create`
    Create,
    /// `update`
    Update,
    /// `delete`
    Delete,
}

/// Remote todo collection
pub trait TodoApi: Send + Sync {
    /// Fetch every todo owned by `user_id`, in server order
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decoding failure.
    fn list(&self, user_id: UserId) -> ApiFuture<'_, Vec<Todo>>;

    /// Create a todo; the server assigns its id
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decoding failure.
    fn create(&self, todo: NewTodo) -> ApiFuture<'_, Todo>;

    /// Replace a todo's title and completion flag
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decoding failure,
    /// or [`ApiError::NotFound`] when the collection has no such todo.
    fn update(&self, todo: Todo) -> ApiFuture<'_, Todo>;

    /// Delete a todo
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or status failure.
    fn delete(&self, id: TodoId) -> ApiFuture<'_, ()>;
}
