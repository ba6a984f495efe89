//! Terminal rendering of [`TodoState`].
//!
//! Every function here is pure: state in, text out. The binary prints the
//! result of [`render`] after each command.

use crate::types::{Filter, Todo, TodoState};

/// Placeholder of the new-todo field
pub const NEW_TODO_PLACEHOLDER: &str = "What needs to be done?";

/// Placeholder of the edit field
pub const EDIT_PLACEHOLDER: &str = "Empty todo will be deleted";

const LOADING: &str = "(saving...)";

/// Toggle-all marker and new-todo field
#[must_use]
pub fn header(state: &TodoState) -> String {
    let toggle_all = if state.todos.is_empty() {
        "   "
    } else if state.all_completed() {
        "[v]"
    } else {
        "[ ]"
    };

    let field = if state.is_submitting {
        format!("{} {LOADING}", state.draft)
    } else if state.draft.is_empty() {
        format!("<{NEW_TODO_PLACEHOLDER}>")
    } else {
        state.draft.clone()
    };

    format!("{toggle_all} {field}")
}

/// One row; `processing` adds the loading marker
#[must_use]
pub fn todo_row(todo: &Todo, editing: bool, processing: bool) -> String {
    let checkbox = if todo.completed { "[x]" } else { "[ ]" };
    let id = if todo.id.is_placeholder() {
        "-".to_string()
    } else {
        todo.id.to_string()
    };

    let mut row = if editing {
        format!("{checkbox} {id:>4}  > {} <{EDIT_PLACEHOLDER}>", todo.title)
    } else {
        format!("{checkbox} {id:>4}  {}", todo.title)
    };

    if processing {
        row.push(' ');
        row.push_str(LOADING);
    }
    row
}

/// Visible rows followed by the placeholder row
#[must_use]
pub fn todo_list(state: &TodoState) -> Vec<String> {
    state
        .visible()
        .into_iter()
        .map(|todo| {
            todo_row(
                todo,
                state.editing == Some(todo.id),
                state.is_processing(todo.id),
            )
        })
        .chain(state.temp_todo.iter().map(|temp| todo_row(temp, false, true)))
        .collect()
}

/// Counter, filter links and clear-completed; `None` for an empty list
#[must_use]
pub fn footer(state: &TodoState) -> Option<String> {
    if state.todos.is_empty() {
        return None;
    }

    let links = Filter::ALL
        .iter()
        .map(|&filter| {
            if filter == state.filter {
                format!("*{}*", filter.label())
            } else {
                filter.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ");

    let clear = if state.has_completed() {
        "[Clear completed]"
    } else {
        "(Clear completed)"
    };

    Some(format!(
        "{} items left   {links}   {clear}",
        state.active_count()
    ))
}

/// Current error with its hide control; `None` when there is no error
#[must_use]
pub fn error_banner(state: &TodoState) -> Option<String> {
    state
        .error
        .as_ref()
        .map(|banner| format!("! {}  [x] (dismiss)", banner.message))
}

/// Full screen
#[must_use]
pub fn render(state: &TodoState) -> String {
    let mut lines = vec!["todos".to_string()];
    if state.is_loading {
        lines.push("loading...".to_string());
    }
    lines.push(header(state));
    lines.extend(todo_list(state));
    lines.extend(footer(state));
    lines.extend(error_banner(state));

    let mut out = String::new();
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ErrorBanner, ErrorMessage, TodoId, UserId};
    use todosync_core::environment::Clock;
    use todosync_testing::test_clock;

    fn todo(id: u64, title: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            user_id: UserId::new(1),
            title: title.to_string(),
            completed,
        }
    }

    fn state() -> TodoState {
        TodoState::with_todos(vec![todo(1, "Buy milk", false), todo(2, "Write docs", true)])
    }

    #[test]
    fn header_hides_toggle_all_for_empty_list() {
        let header = header(&TodoState::new());
        assert!(header.starts_with("   "));
        assert!(header.contains(NEW_TODO_PLACEHOLDER));
    }

    #[test]
    fn header_marks_toggle_all_when_everything_is_done() {
        let mut state = state();
        assert!(header(&state).starts_with("[ ]"));

        for todo in &mut state.todos {
            todo.completed = true;
        }
        assert!(header(&state).starts_with("[v]"));
    }

    #[test]
    fn header_shows_draft_while_submitting() {
        let mut state = TodoState::new();
        state.draft = "Buy bread".to_string();
        state.is_submitting = true;

        let header = header(&state);
        assert!(header.contains("Buy bread"));
        assert!(header.contains(LOADING));
        assert!(!header.contains(NEW_TODO_PLACEHOLDER));
    }

    #[test]
    fn row_modes() {
        let todo = todo(7, "Buy milk", true);
        assert_eq!(todo_row(&todo, false, false), "[x]    7  Buy milk");
        assert!(todo_row(&todo, true, false).contains(EDIT_PLACEHOLDER));
        assert!(todo_row(&todo, false, true).ends_with(LOADING));
    }

    #[test]
    fn list_follows_filter_and_ends_with_placeholder() {
        let mut state = state();
        state.filter = Filter::Active;
        state.temp_todo = Some(Todo::placeholder(UserId::new(1), "Buy bread".to_string()));

        let rows = todo_list(&state);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("Buy milk"));
        assert!(rows[1].contains("Buy bread"));
        assert!(rows[1].ends_with(LOADING));
    }

    #[test]
    fn footer_counts_and_marks_selected_filter() {
        let mut state = state();
        state.filter = Filter::Completed;

        let footer = footer(&state).unwrap_or_default();
        assert!(footer.starts_with("1 items left"));
        assert!(footer.contains("All | Active | *Completed*"));
        assert!(footer.contains("[Clear completed]"));
    }

    #[test]
    fn footer_disables_clear_without_completed() {
        let state = TodoState::with_todos(vec![todo(1, "Buy milk", false)]);
        assert!(footer(&state).unwrap_or_default().contains("(Clear completed)"));
    }

    #[test]
    fn footer_hidden_for_empty_list() {
        assert!(footer(&TodoState::new()).is_none());
    }

    #[test]
    fn banner_shows_message() {
        let mut state = TodoState::new();
        assert!(error_banner(&state).is_none());

        state.error = Some(ErrorBanner {
            message: ErrorMessage::Delete,
            raised_at: test_clock().now(),
            generation: 1,
        });
        let banner = error_banner(&state).unwrap_or_default();
        assert!(banner.contains("Unable to delete a todo"));
        assert!(banner.contains("dismiss"));
    }

    #[test]
    fn render_stacks_sections() {
        let screen = render(&state());
        let lines: Vec<&str> = screen.lines().collect();
        assert_eq!(lines[0], "todos");
        assert!(lines[2].contains("Buy milk"));
        assert!(lines[3].contains("Write docs"));
        assert!(lines[4].contains("items left"));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn render_ends_every_section_with_newline() {
        let mut state = state();
        state.is_loading = true;
        state.error = Some(ErrorBanner {
            message: ErrorMessage::Load,
            raised_at: test_clock().now(),
            generation: 1,
        });

        let screen = render(&state);
        let lines: Vec<&str> = screen.lines().collect();
        assert_eq!(lines[1], "loading...");
        assert!(lines[5].contains("items left"));
        assert!(lines[6].contains("Unable to load todos"));
        assert_eq!(lines.len(), 7);
        assert!(screen.ends_with("(dismiss)\n"));
    }
}
