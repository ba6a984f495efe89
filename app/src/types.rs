//! Domain types for the todo client.
//!
//! `TodoState` is everything the terminal view renders. It holds the
//! authoritative list as last confirmed (or optimistically patched), the
//! UI-only bookkeeping around it (filter, in-flight ids, placeholder row,
//! error banner, edit mode), and nothing derived.

use crate::selectors;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Server-assigned todo identifier
///
/// `TodoId(0)` is reserved for the placeholder row shown while a create is
/// in flight and is never sent to the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Id of the unsaved placeholder todo
    pub const PLACEHOLDER: Self = Self(0);

    /// Creates a `TodoId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true for the unsaved placeholder id
    #[must_use]
    pub const fn is_placeholder(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TodoId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Owner of the todo collection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Creates a `UserId` from its numeric value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo record as stored by the remote collection
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned id (0 for the placeholder)
    pub id: TodoId,
    /// Owner
    pub user_id: UserId,
    /// Title, always stored trimmed
    pub title: String,
    /// Completion flag
    pub completed: bool,
}

impl Todo {
    /// Builds the placeholder row displayed while a create is in flight
    #[must_use]
    pub const fn placeholder(user_id: UserId, title: String) -> Self {
        Self {
            id: TodoId::PLACEHOLDER,
            user_id,
            title,
            completed: false,
        }
    }
}

/// Visibility rule applied to the list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// All filters in display order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns true when `todo` is visible under this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }

    /// Link label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Route fragment the filter is addressed by
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a filter name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter '{0}' (expected all, active or completed)")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches("#/").to_ascii_lowercase();
        match normalized.as_str() {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseFilterError(s.to_string())),
        }
    }
}

/// User-facing error messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    /// The initial list could not be fetched
    Load,
    /// A create request failed
    Add,
    /// An update request failed
    Update,
    /// A delete request failed
    Delete,
    /// A blank title was submitted
    EmptyTitle,
}

impl ErrorMessage {
    /// Text shown in the banner
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Load => "Unable to load todos",
            Self::Add => "Unable to add a todo",
            Self::Update => "Unable to update a todo",
            Self::Delete => "Unable to delete a todo",
            Self::EmptyTitle => "Title should not be empty",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// The error currently displayed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorBanner {
    /// Which message
    pub message: ErrorMessage,
    /// When it was raised
    pub raised_at: DateTime<Utc>,
    /// Increases with every raised error; expiry timers carry the value they were armed with
    pub generation: u64,
}

/// Which kind of change an update request carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    /// Completion flag flipped (single toggle or toggle-all)
    Toggle,
    /// Title changed from edit mode
    Rename,
}

/// State of the todo client
#[derive(Clone, Debug, Default)]
pub struct TodoState {
    /// Authoritative list in server order
    pub todos: Vec<Todo>,
    /// Active filter
    pub filter: Filter,
    /// Ids with a remote mutation in flight
    pub processing: BTreeSet<TodoId>,
    /// Placeholder shown while a create is in flight
    pub temp_todo: Option<Todo>,
    /// Current error banner
    pub error: Option<ErrorBanner>,
    /// Row in edit mode
    pub editing: Option<TodoId>,
    /// Contents of the new-todo field
    pub draft: String,
    /// A create request is in flight
    pub is_submitting: bool,
    /// The initial load is in flight
    pub is_loading: bool,
    /// Generation assigned to the last raised error
    pub error_generation: u64,
}

impl TodoState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Returns true when a remote mutation for `id` is in flight
    #[must_use]
    pub fn is_processing(&self, id: TodoId) -> bool {
        self.processing.contains(&id)
    }

    /// Message of the current error banner, if any
    #[must_use]
    pub fn error_message(&self) -> Option<ErrorMessage> {
        self.error.as_ref().map(|banner| banner.message)
    }

    /// Todos visible under the active filter
    #[must_use]
    pub fn visible(&self) -> Vec<&Todo> {
        selectors::visible_todos(&self.todos, self.filter)
    }

    /// Number of incomplete todos
    #[must_use]
    pub fn active_count(&self) -> usize {
        selectors::active_count(&self.todos)
    }

    /// True when every todo is completed
    #[must_use]
    pub fn all_completed(&self) -> bool {
        selectors::all_completed(&self.todos)
    }

    /// True when at least one todo is completed
    #[must_use]
    pub fn has_completed(&self) -> bool {
        selectors::has_completed(&self.todos)
    }

    pub(crate) fn get_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id == id)
    }
}

/// Actions: user intents plus the results fed back by effects
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Intents ==========
    /// Fetch the list from the server
    Load,
    /// Create a todo from the entry field
    AddTodo {
        /// Raw title as typed
        title: String,
    },
    /// Flip one todo's completion flag
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },
    /// Complete everything, or un-complete everything when all are complete
    ToggleAll,
    /// Enter edit mode on a row
    BeginEdit {
        /// Row to edit
        id: TodoId,
    },
    /// Leave edit mode without saving
    CancelEdit,
    /// Save the edited title (blank deletes the todo)
    SubmitEdit {
        /// Row being edited
        id: TodoId,
        /// Raw title as typed
        title: String,
    },
    /// Delete one todo
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },
    /// Delete every completed todo
    ClearCompleted,
    /// Change the visibility filter
    SetFilter {
        /// New filter
        filter: Filter,
    },
    /// Hide the error banner
    DismissError,

    // ========== Feedback ==========
    /// List fetched
    Loaded {
        /// Server list
        todos: Vec<Todo>,
    },
    /// List fetch failed
    LoadFailed {
        /// Underlying error
        reason: String,
    },
    /// Create succeeded
    TodoAdded {
        /// Todo as stored by the server
        todo: Todo,
    },
    /// Create failed
    AddFailed {
        /// Underlying error
        reason: String,
    },
    /// Update succeeded
    TodoUpdated {
        /// Todo as stored by the server
        todo: Todo,
        /// What the update changed
        mutation: Mutation,
    },
    /// Update failed
    UpdateFailed {
        /// Copy to restore
        previous: Todo,
        /// What the update tried to change
        mutation: Mutation,
        /// Underlying error
        reason: String,
    },
    /// Delete succeeded
    TodoDeleted {
        /// Deleted todo
        id: TodoId,
    },
    /// Delete failed
    DeleteFailed {
        /// Todo that is kept
        id: TodoId,
        /// Underlying error
        reason: String,
    },
    /// The error timer armed for `generation` fired
    ErrorExpired {
        /// Generation the timer was armed with
        generation: u64,
    },
}
