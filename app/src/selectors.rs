//! Pure derivations over the todo list.
//!
//! Nothing here is cached in state: the view recomputes these on every render.

use crate::types::{Filter, Todo};

/// Todos visible under `filter`, in list order
#[must_use]
pub fn visible_todos(todos: &[Todo], filter: Filter) -> Vec<&Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}

/// Number of incomplete todos
#[must_use]
pub fn active_count(todos: &[Todo]) -> usize {
    todos.iter().filter(|todo| !todo.completed).count()
}

/// Number of completed todos
#[must_use]
pub fn completed_count(todos: &[Todo]) -> usize {
    todos.len() - active_count(todos)
}

/// True when every todo is completed (vacuously true for an empty list)
#[must_use]
pub fn all_completed(todos: &[Todo]) -> bool {
    todos.iter().all(|todo| todo.completed)
}

/// True when at least one todo is completed
#[must_use]
pub fn has_completed(todos: &[Todo]) -> bool {
    todos.iter().any(|todo| todo.completed)
}
