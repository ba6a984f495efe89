//! Line commands understood by the interactive binary.

use crate::types::{Filter, TodoAction, TodoId};
use thiserror::Error;

/// Usage text printed by `help` and after an unrecognised command
pub const USAGE: &str = "\
commands:
  add <title>            create a todo
  toggle <id>            flip a todo's completion
  toggle-all             complete all, or reopen all when everything is done
  edit <id>              start editing a todo
  save <title>           save the title being edited (empty deletes)
  cancel                 stop editing
  rename <id> <title>    edit and save in one step
  rm <id>                delete a todo
  clear                  delete every completed todo
  filter <all|active|completed>
  dismiss                hide the error message
  show                   redraw the list
  help                   show this text
  quit                   exit";

/// A parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Dispatch one action to the store
    Dispatch(TodoAction),
    /// Save the title of the row in edit mode
    Save(String),
    /// Redraw
    Show,
    /// Print usage
    Help,
    /// Exit
    Quit,
}

/// Errors from [`parse`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Blank line
    #[error("empty command")]
    Empty,
    /// First word is not a command
    #[error("unknown command '{0}'")]
    Unknown(String),
    /// A command was given the wrong arguments
    #[error("usage: {0}")]
    Usage(&'static str),
}

fn id_arg(arg: &str, usage: &'static str) -> Result<TodoId, CommandError> {
    arg.trim().parse().map_err(|_| CommandError::Usage(usage))
}

/// Parse one input line
///
/// # Errors
///
/// Returns a [`CommandError`] for blank lines, unknown commands, and
/// malformed arguments.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let action = match word.to_ascii_lowercase().as_str() {
        "" => return Err(CommandError::Empty),
        "show" | "ls" => return Ok(Command::Show),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        // Blank titles are kept so the reducer reports them
        "save" => return Ok(Command::Save(rest.to_string())),

        "add" => TodoAction::AddTodo {
            title: rest.to_string(),
        },
        "toggle" => TodoAction::ToggleTodo {
            id: id_arg(rest, "toggle <id>")?,
        },
        "toggle-all" => TodoAction::ToggleAll,
        "edit" => TodoAction::BeginEdit {
            id: id_arg(rest, "edit <id>")?,
        },
        "cancel" => TodoAction::CancelEdit,
        "rename" => {
            let usage = "rename <id> <title>";
            let (id, title) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            TodoAction::SubmitEdit {
                id: id_arg(id, usage)?,
                title: title.to_string(),
            }
        },
        "rm" | "delete" => TodoAction::DeleteTodo {
            id: id_arg(rest, "rm <id>")?,
        },
        "clear" => TodoAction::ClearCompleted,
        "filter" => TodoAction::SetFilter {
            filter: rest
                .parse::<Filter>()
                .map_err(|_| CommandError::Usage("filter <all|active|completed>"))?,
        },
        "dismiss" => TodoAction::DismissError,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };

    Ok(Command::Dispatch(action))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_the_rest_of_the_line() {
        assert_eq!(
            parse("add   Buy oat milk "),
            Ok(Command::Dispatch(TodoAction::AddTodo {
                title: "Buy oat milk".to_string()
            }))
        );
    }

    #[test]
    fn id_commands() {
        assert_eq!(
            parse("toggle 4"),
            Ok(Command::Dispatch(TodoAction::ToggleTodo { id: TodoId::new(4) }))
        );
        assert_eq!(
            parse("RM 9"),
            Ok(Command::Dispatch(TodoAction::DeleteTodo { id: TodoId::new(9) }))
        );
        assert_eq!(parse("toggle four"), Err(CommandError::Usage("toggle <id>")));
        assert_eq!(parse("edit"), Err(CommandError::Usage("edit <id>")));
    }

    #[test]
    fn rename_splits_id_and_title() {
        assert_eq!(
            parse("rename 3 Ship it today"),
            Ok(Command::Dispatch(TodoAction::SubmitEdit {
                id: TodoId::new(3),
                title: "Ship it today".to_string()
            }))
        );
        assert_eq!(
            parse("rename 3"),
            Ok(Command::Dispatch(TodoAction::SubmitEdit {
                id: TodoId::new(3),
                title: String::new()
            }))
        );
    }

    #[test]
    fn filter_accepts_labels_and_routes() {
        assert_eq!(
            parse("filter #/active"),
            Ok(Command::Dispatch(TodoAction::SetFilter {
                filter: Filter::Active
            }))
        );
        assert_eq!(
            parse("filter done"),
            Err(CommandError::Usage("filter <all|active|completed>"))
        );
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse("save  "), Ok(Command::Save(String::new())));
        assert_eq!(parse("show"), Ok(Command::Show));
        assert_eq!(parse("help"), Ok(Command::Help));
        assert_eq!(parse("quit"), Ok(Command::Quit));
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("frobnicate 1"), Err(CommandError::Unknown("frobnicate".to_string())));
    }
}
