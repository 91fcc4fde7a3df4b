//! Command line parsing for the terminal front-end.
//!
//! Each line typed by the user maps to at most one [`Event`]:
//!
//! - `list` / `reload` / `ls` → `Reload`
//! - `add <name>` → `Submit`
//! - `rm <id>` / `delete <id>` → `Delete`
//! - `backend go|java` / `use go|java` → `SelectBackend`
//! - `help` / `?` → help text
//! - `quit` / `exit` / `q` → `Quit`

use crate::app::Event;
use crate::domain::{Backend, TodoId};

/// Help text listing the available commands.
pub const HELP: &str = "\
commands:
  list | reload          fetch todos from the selected backend
  add <name>             create a todo
  rm <id>                delete a todo by id
  backend go|java        switch backend (reloads the list)
  help                   show this help
  quit                   exit";

/// What a typed line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward an event to the application.
    Event(Event),
    /// Print [`HELP`].
    Help,
    /// Blank line.
    Nothing,
}

/// Parses one input line.
///
/// # Errors
///
/// Returns a message suitable for display when the line is not a command.
///
/// # Example
///
/// ```rust
/// use todo_tracer::app::Event;
/// use todo_tracer::ui::input::{parse_line, Command};
///
/// assert_eq!(
///     parse_line("add buy milk").unwrap(),
///     Command::Event(Event::Submit { name: "buy milk".into() })
/// );
/// ```
pub fn parse_line(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Nothing);
    }

    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let event = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" | "reload" => Event::Reload,
        "add" | "new" => {
            if rest.is_empty() {
                return Err("usage: add <name>".to_string());
            }
            Event::Submit {
                name: rest.to_string(),
            }
        }
        "rm" | "del" | "delete" => {
            if rest.is_empty() {
                return Err("usage: rm <id>".to_string());
            }
            Event::Delete {
                id: TodoId::from(rest),
            }
        }
        "backend" | "use" => {
            let backend: Backend = rest.parse().map_err(|e| format!("{e}"))?;
            Event::SelectBackend(backend)
        }
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => Event::Quit,
        other => return Err(format!("unknown command '{other}', type 'help'")),
    };

    Ok(Command::Event(event))
}
