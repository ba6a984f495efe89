//! Terminal todo list client kept in sync with a remote todo collection.
//!
//! The list lives on a REST server and is scoped to one user. This crate
//! holds the client side:
//!
//! - [`types`]: the data model, client state and actions
//! - [`reducer`]: intent handling with optimistic toggles and renames,
//!   server-confirmed deletes, and self-expiring error messages
//! - [`selectors`]: filtered view and counters derived from the list
//! - [`view`]: pure text rendering of the state
//! - [`api`]: the remote store adapter (`reqwest`) and an in-memory double
//! - [`config`] and [`cli`]: what the interactive binary needs
//!
//! # Quick Start
//!
//! ```no_run
//! use todosync::{InMemoryTodoApi, TodoAction, TodoEnvironment, TodoReducer, TodoState, UserId};
//! use todosync_core::environment::SystemClock;
//! use todosync_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(InMemoryTodoApi::new()), Arc::new(SystemClock), UserId::new(1));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! // Create a todo and wait for the server's answer
//! let mut handle = store.send(TodoAction::AddTodo { title: "Buy milk".to_string() }).await?;
//! handle.wait().await;
//!
//! let screen = store.state(todosync::view::render).await;
//! println!("{screen}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod reducer;
pub mod selectors;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use api::{ApiError, HttpTodoApi, InMemoryTodoApi, TodoApi};
pub use config::{Config, ConfigError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{ErrorMessage, Filter, Todo, TodoAction, TodoId, TodoState, UserId};
