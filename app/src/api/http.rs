//! `reqwest`-backed todo API client

use super::{ApiError, ApiFuture, NewTodo, TodoApi};
use crate::types::{Todo, TodoId, UserId};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Fields sent on update; id and owner travel in the URL and never change
#[derive(Serialize)]
struct TodoPatch<'a> {
    title: &'a str,
    completed: bool,
}

/// HTTP client for the todo collection API
///
/// Endpoints, relative to `base_url`:
///
/// | call | request |
/// |------|---------|
/// | list | `GET /todos?userId={id}` |
/// | create | `POST /todos` |
/// | update | `PATCH /todos/{id}` |
/// | delete | `DELETE /todos/{id}` |
#[derive(Clone, Debug)]
pub struct HttpTodoApi {
    client: Client,
    base_url: String,
}

impl HttpTodoApi {
    /// Create a client for `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestFailed`] if the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn todos_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn todo_url(&self, id: TodoId) -> String {
        format!("{}/todos/{id}", self.base_url)
    }
}

/// Map a non-success status to [`ApiError::Status`]
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
}

fn transport(error: &reqwest::Error) -> ApiError {
    ApiError::RequestFailed(error.to_string())
}

impl TodoApi for HttpTodoApi {
    fn list(&self, user_id: UserId) -> ApiFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            tracing::debug!(%user_id, "GET todos");
            let response = self
                .client
                .get(self.todos_url())
                .query(&[("userId", user_id.get())])
                .send()
                .await
                .map_err(|e| transport(&e))?;
            decode(response).await
        })
    }

    fn create(&self, todo: NewTodo) -> ApiFuture<'_, Todo> {
        Box::pin(async move {
            tracing::debug!(title = %todo.title, "POST todo");
            let response = self
                .client
                .post(self.todos_url())
                .json(&todo)
                .send()
                .await
                .map_err(|e| transport(&e))?;
            decode(response).await
        })
    }

    fn update(&self, todo: Todo) -> ApiFuture<'_, Todo> {
        Box::pin(async move {
            tracing::debug!(id = %todo.id, "PATCH todo");
            let patch = TodoPatch {
                title: &todo.title,
                completed: todo.completed,
            };
            let response = self
                .client
                .patch(self.todo_url(todo.id))
                .json(&patch)
                .send()
                .await
                .map_err(|e| transport(&e))?;
            decode(response).await
        })
    }

    fn delete(&self, id: TodoId) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            tracing::debug!(%id, "DELETE todo");
            let response = self
                .client
                .delete(self.todo_url(id))
                .send()
                .await
                .map_err(|e| transport(&e))?;
            check_status(response).await.map(|_| ())
        })
    }
}
