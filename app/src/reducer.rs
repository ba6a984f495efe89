//! Reducer logic for the todo client.
//!
//! Intents validate against the current state and return effect
//! descriptions for the remote calls; the calls' results come back as
//! feedback actions. Toggles and title edits are applied optimistically and
//! rolled back from the copy carried by `UpdateFailed`. Creates show a
//! placeholder row; deletes wait for the server.

use crate::api::{NewTodo, TodoApi};
use crate::types::{
    ErrorBanner, ErrorMessage, Mutation, Todo, TodoAction, TodoId, TodoState, UserId,
};
use std::sync::Arc;
use std::time::Duration;
use todosync_core::{
    SmallVec, async_effect, delay, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};

/// How long an error banner stays up unless dismissed
pub const DEFAULT_ERROR_TIMEOUT: Duration = Duration::from_secs(3);

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Remote todo collection
    pub api: Arc<dyn TodoApi>,
    /// Clock for stamping error banners
    pub clock: Arc<dyn Clock>,
    /// Owner of every todo this client creates or lists
    pub user_id: UserId,
    /// Error banner lifetime
    pub error_timeout: Duration,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` with the default error timeout
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>, clock: Arc<dyn Clock>, user_id: UserId) -> Self {
        Self {
            api,
            clock,
            user_id,
            error_timeout: DEFAULT_ERROR_TIMEOUT,
        }
    }

    /// Overrides the error banner lifetime
    #[must_use]
    pub const fn with_error_timeout(mut self, timeout: Duration) -> Self {
        self.error_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment")
            .field("user_id", &self.user_id)
            .field("error_timeout", &self.error_timeout)
            .finish_non_exhaustive()
    }
}

type Effects = SmallVec<[Effect<TodoAction>; 4]>;

/// Reducer for the todo client
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Shows `message` and arms its expiry timer
    fn raise_error(
        state: &mut TodoState,
        env: &TodoEnvironment,
        message: ErrorMessage,
    ) -> Effect<TodoAction> {
        state.error_generation += 1;
        let generation = state.error_generation;
        state.error = Some(ErrorBanner {
            message,
            raised_at: env.clock.now(),
            generation,
        });

        delay! {
            duration: env.error_timeout,
            action: TodoAction::ErrorExpired { generation }
        }
    }

    /// Returns a copy of the todo if a mutation may start on it now
    ///
    /// The placeholder, unknown ids and ids already in flight are refused.
    fn mutable_todo(state: &TodoState, id: TodoId) -> Option<Todo> {
        if id.is_placeholder() {
            return None;
        }
        if state.is_processing(id) {
            tracing::debug!(%id, "Ignoring mutation: request already in flight");
            return None;
        }
        let todo = state.get(id).cloned();
        if todo.is_none() {
            tracing::debug!(%id, "Ignoring mutation: unknown todo");
        }
        todo
    }

    /// Applies `change` optimistically and returns the update effect
    fn start_update(
        state: &mut TodoState,
        env: &TodoEnvironment,
        id: TodoId,
        mutation: Mutation,
        change: impl FnOnce(&mut Todo),
    ) -> Option<Effect<TodoAction>> {
        let previous = Self::mutable_todo(state, id)?;
        let mut updated = previous.clone();
        change(&mut updated);

        if let Some(todo) = state.get_mut(id) {
            *todo = updated.clone();
        }
        state.processing.insert(id);

        let api = Arc::clone(&env.api);
        Some(async_effect! {
            match api.update(updated).await {
                Ok(todo) => Some(TodoAction::TodoUpdated { todo, mutation }),
                Err(error) => Some(TodoAction::UpdateFailed {
                    previous,
                    mutation,
                    reason: error.to_string(),
                }),
            }
        })
    }

    /// Marks the todo as processing and returns the delete effect
    fn start_delete(state: &mut TodoState, env: &TodoEnvironment, id: TodoId) -> Option<Effect<TodoAction>> {
        Self::mutable_todo(state, id)?;
        state.processing.insert(id);

        let api = Arc::clone(&env.api);
        Some(async_effect! {
            match api.delete(id).await {
                Ok(()) => Some(TodoAction::TodoDeleted { id }),
                Err(error) => Some(TodoAction::DeleteFailed {
                    id,
                    reason: error.to_string(),
                }),
            }
        })
    }

    /// Wraps a batch of per-todo effects into one parallel effect
    fn batch(effects: Vec<Effect<TodoAction>>) -> Effects {
        if effects.is_empty() {
            SmallVec::new()
        } else {
            smallvec![Effect::merge(effects)]
        }
    }

    fn add_todo(state: &mut TodoState, env: &TodoEnvironment, title: &str) -> Effects {
        if state.is_submitting {
            tracing::debug!("Ignoring add: a create is already in flight");
            return SmallVec::new();
        }

        let title = title.trim();
        if title.is_empty() {
            return smallvec![Self::raise_error(state, env, ErrorMessage::EmptyTitle)];
        }

        state.draft = title.to_string();
        state.is_submitting = true;
        state.temp_todo = Some(Todo::placeholder(env.user_id, title.to_string()));

        let api = Arc::clone(&env.api);
        let new_todo = NewTodo::new(env.user_id, title.to_string());
        smallvec![async_effect! {
            match api.create(new_todo).await {
                Ok(todo) => Some(TodoAction::TodoAdded { todo }),
                Err(error) => Some(TodoAction::AddFailed { reason: error.to_string() }),
            }
        }]
    }

    fn toggle_all(state: &mut TodoState, env: &TodoEnvironment) -> Effects {
        let target = !state.all_completed();
        let ids: Vec<TodoId> = state
            .todos
            .iter()
            .filter(|todo| todo.completed != target)
            .map(|todo| todo.id)
            .collect();

        let effects = ids
            .into_iter()
            .filter_map(|id| {
                Self::start_update(state, env, id, Mutation::Toggle, |todo| {
                    todo.completed = target;
                })
            })
            .collect();

        Self::batch(effects)
    }

    fn submit_edit(state: &mut TodoState, env: &TodoEnvironment, id: TodoId, title: &str) -> Effects {
        let Some(current) = state.get(id) else {
            state.editing = None;
            return SmallVec::new();
        };

        let title = title.trim();
        if title == current.title {
            state.editing = None;
            return SmallVec::new();
        }

        let effect = if title.is_empty() {
            Self::start_delete(state, env, id)
        } else {
            let title = title.to_string();
            Self::start_update(state, env, id, Mutation::Rename, move |todo| {
                todo.title = title;
            })
        };

        effect.into_iter().collect()
    }

    fn clear_completed(state: &mut TodoState, env: &TodoEnvironment) -> Effects {
        let ids: Vec<TodoId> = state
            .todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id)
            .collect();

        let effects = ids
            .into_iter()
            .filter_map(|id| Self::start_delete(state, env, id))
            .collect();

        Self::batch(effects)
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action; splitting hides the flow
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Intents ==========
            TodoAction::Load => {
                state.is_loading = true;
                let api = Arc::clone(&env.api);
                let user_id = env.user_id;
                smallvec![async_effect! {
                    match api.list(user_id).await {
                        Ok(todos) => Some(TodoAction::Loaded { todos }),
                        Err(error) => Some(TodoAction::LoadFailed { reason: error.to_string() }),
                    }
                }]
            },

            TodoAction::AddTodo { title } => Self::add_todo(state, env, &title),

            TodoAction::ToggleTodo { id } => {
                Self::start_update(state, env, id, Mutation::Toggle, |todo| {
                    todo.completed = !todo.completed;
                })
                .into_iter()
                .collect()
            },

            TodoAction::ToggleAll => Self::toggle_all(state, env),

            TodoAction::BeginEdit { id } => {
                if !id.is_placeholder() && state.get(id).is_some() {
                    state.editing = Some(id);
                }
                SmallVec::new()
            },

            TodoAction::CancelEdit => {
                state.editing = None;
                SmallVec::new()
            },

            TodoAction::SubmitEdit { id, title } => Self::submit_edit(state, env, id, &title),

            TodoAction::DeleteTodo { id } => Self::start_delete(state, env, id).into_iter().collect(),

            TodoAction::ClearCompleted => Self::clear_completed(state, env),

            TodoAction::SetFilter { filter } => {
                state.filter = filter;
                SmallVec::new()
            },

            TodoAction::DismissError => {
                state.error = None;
                SmallVec::new()
            },

            // ========== Feedback ==========
            TodoAction::Loaded { todos } => {
                tracing::info!(count = todos.len(), "Loaded todos");
                state.is_loading = false;
                state.todos = todos;
                SmallVec::new()
            },

            TodoAction::LoadFailed { reason } => {
                tracing::warn!(%reason, "Loading todos failed");
                state.is_loading = false;
                smallvec![Self::raise_error(state, env, ErrorMessage::Load)]
            },

            TodoAction::TodoAdded { todo } => {
                tracing::debug!(id = %todo.id, "Todo added");
                state.todos.push(todo);
                state.temp_todo = None;
                state.is_submitting = false;
                state.draft.clear();
                SmallVec::new()
            },

            TodoAction::AddFailed { reason } => {
                tracing::warn!(%reason, "Creating todo failed");
                state.temp_todo = None;
                state.is_submitting = false;
                smallvec![Self::raise_error(state, env, ErrorMessage::Add)]
            },

            TodoAction::TodoUpdated { todo, mutation } => {
                let id = todo.id;
                state.processing.remove(&id);
                if let Some(existing) = state.get_mut(id) {
                    *existing = todo;
                }
                if mutation == Mutation::Rename && state.editing == Some(id) {
                    state.editing = None;
                }
                SmallVec::new()
            },

            TodoAction::UpdateFailed {
                previous,
                mutation,
                reason,
            } => {
                tracing::warn!(id = %previous.id, ?mutation, %reason, "Updating todo failed, rolling back");
                state.processing.remove(&previous.id);
                if let Some(existing) = state.get_mut(previous.id) {
                    *existing = previous;
                }
                smallvec![Self::raise_error(state, env, ErrorMessage::Update)]
            },

            TodoAction::TodoDeleted { id } => {
                tracing::debug!(%id, "Todo deleted");
                state.processing.remove(&id);
                state.todos.retain(|todo| todo.id != id);
                if state.editing == Some(id) {
                    state.editing = None;
                }
                SmallVec::new()
            },

            TodoAction::DeleteFailed { id, reason } => {
                tracing::warn!(%id, %reason, "Deleting todo failed");
                state.processing.remove(&id);
                smallvec![Self::raise_error(state, env, ErrorMessage::Delete)]
            },

            TodoAction::ErrorExpired { generation } => {
                if state
                    .error
                    .as_ref()
                    .is_some_and(|banner| banner.generation == generation)
                {
                    state.error = None;
                }
                SmallVec::new()
            },
        }
    }
}
