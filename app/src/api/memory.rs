//! In-memory todo collection for fast, deterministic tests.

use super::{ApiError, ApiFuture, ApiOperation, NewTodo, TodoApi};
use crate::types::{Todo, TodoId, UserId};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    todos: Vec<Todo>,
    next_id: u64,
    failing: HashSet<ApiOperation>,
    failing_ids: HashSet<(ApiOperation, TodoId)>,
    calls: Vec<ApiOperation>,
}

/// In-memory implementation of [`TodoApi`]
///
/// Ids are assigned sequentially from 1. Every call is recorded, and any
/// operation kind can be switched to fail with [`ApiError::Status`] 500,
/// either for every todo or for a single one. Clones share the same
/// collection.
///
/// # Example
///
/// ```
/// use todosync::api::{ApiOperation, InMemoryTodoApi, NewTodo, TodoApi};
/// use todosync::types::UserId;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let api = InMemoryTodoApi::new();
/// let created = api.create(NewTodo::new(UserId::new(1), "Buy milk".into())).await?;
/// assert_eq!(created.id.get(), 1);
///
/// api.fail(ApiOperation::List);
/// assert!(api.list(UserId::new(1)).await.is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTodoApi {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryTodoApi {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection pre-filled with `todos`
    ///
    /// New ids continue after the largest seeded id.
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|todo| todo.id.get()).max().unwrap_or(0);
        Self {
            inner: Arc::new(Mutex::new(Inner {
                todos,
                next_id,
                ..Inner::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every subsequent call of `operation` fail
    pub fn fail(&self, operation: ApiOperation) {
        self.lock().failing.insert(operation);
    }

    /// Make every subsequent `operation` on todo `id` fail
    ///
    /// Calls on other todos are unaffected.
    pub fn fail_for(&self, operation: ApiOperation, id: TodoId) {
        self.lock().failing_ids.insert((operation, id));
    }

    /// Let `operation` succeed again, for every todo
    pub fn recover(&self, operation: ApiOperation) {
        let mut inner = self.lock();
        inner.failing.remove(&operation);
        inner.failing_ids.retain(|&(failing, _)| failing != operation);
    }

    /// Snapshot of the stored todos
    #[must_use]
    pub fn todos(&self) -> Vec<Todo> {
        self.lock().todos.clone()
    }

    /// Every call received so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<ApiOperation> {
        self.lock().calls.clone()
    }

    /// Number of calls of `operation` received so far
    #[must_use]
    pub fn call_count(&self, operation: ApiOperation) -> usize {
        self.lock().calls.iter().filter(|&&call| call == operation).count()
    }

    /// Record the call and return a lock on the collection, or the injected failure
    fn begin(
        &self,
        operation: ApiOperation,
        id: Option<TodoId>,
    ) -> Result<MutexGuard<'_, Inner>, ApiError> {
        let mut inner = self.lock();
        inner.calls.push(operation);
        let failing_id = id.is_some_and(|id| inner.failing_ids.contains(&(operation, id)));
        if failing_id || inner.failing.contains(&operation) {
            return Err(ApiError::Status {
                status: 500,
                message: format!("injected {operation:?} failure"),
            });
        }
        Ok(inner)
    }
}

impl TodoApi for InMemoryTodoApi {
    fn list(&self, user_id: UserId) -> ApiFuture<'_, Vec<Todo>> {
        let result = self.begin(ApiOperation::List, None).map(|inner| {
            inner
                .todos
                .iter()
                .filter(|todo| todo.user_id == user_id)
                .cloned()
                .collect()
        });
        Box::pin(async move {
            tokio::task::yield_now().await;
            result
        })
    }

    fn create(&self, todo: NewTodo) -> ApiFuture<'_, Todo> {
        let result = self.begin(ApiOperation::Create, None).map(|mut inner| {
            inner.next_id += 1;
            let created = Todo {
                id: TodoId::new(inner.next_id),
                user_id: todo.user_id,
                title: todo.title,
                completed: todo.completed,
            };
            inner.todos.push(created.clone());
            created
        });
        Box::pin(async move {
            tokio::task::yield_now().await;
            result
        })
    }

    fn update(&self, todo: Todo) -> ApiFuture<'_, Todo> {
        let result = self.begin(ApiOperation::Update, Some(todo.id)).and_then(|mut inner| {
            let stored = inner
                .todos
                .iter_mut()
                .find(|stored| stored.id == todo.id)
                .ok_or(ApiError::NotFound(todo.id))?;
            stored.title.clone_from(&todo.title);
            stored.completed = todo.completed;
            Ok(stored.clone())
        });
        Box::pin(async move {
            tokio::task::yield_now().await;
            result
        })
    }

    fn delete(&self, id: TodoId) -> ApiFuture<'_, ()> {
        let result = self.begin(ApiOperation::Delete, Some(id)).map(|mut inner| {
            inner.todos.retain(|todo| todo.id != id);
        });
        Box::pin(async move {
            tokio::task::yield_now().await;
            result
        })
    }
}
