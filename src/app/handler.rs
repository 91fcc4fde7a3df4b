//! Event handling and state transition logic.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Input events arrive from the terminal front-end
//! 2. [`handle_event`] pattern-matches the event and mutates `AppState`
//! 3. Actions are returned for the dispatcher to execute
//! 4. The dispatcher reports the outcome as a completion event
//!
//! # Event Types
//!
//! - **Input**: `Mounted`, `SelectBackend`, `Reload`, `Submit`, `Delete`, `Quit`
//! - **Completion**: `TodosLoaded`, `TodoCreated`, `TodoDeleted`, `OperationFailed`
//!
//! Input events that would start a backend call are ignored while an operation
//! is pending, mirroring disabled controls. Completion events are always
//! applied, including a late `TodosLoaded` issued before a backend switch.
//!
//! # Example
//!
//! ```rust
//! use todo_tracer::app::{handle_event, Action, AppState, Event};
//! use todo_tracer::domain::Backend;
//!
//! let mut state = AppState::new(Backend::Go);
//! let (render, actions) = handle_event(&mut state, &Event::Mounted)?;
//! assert_eq!(actions, vec![Action::LoadTodos { backend: Backend::Go }]);
//! # Ok::<(), todo_tracer::TodoError>(())
//! ```

use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Backend, TodoId, TodoItem};

/// Events triggered by user input or by a finished backend operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The UI came up; load the list for the selected backend.
    Mounted,
    /// The user picked a backend.
    SelectBackend(Backend),
    /// The user asked for the list to be fetched again.
    Reload,
    /// The user submitted a new todo.
    Submit {
        /// Name as typed.
        name: String,
    },
    /// The user asked to delete a todo.
    Delete {
        /// Id of the todo to delete.
        id: TodoId,
    },
    /// The user asked to leave.
    Quit,

    /// A list call finished; replaces the cached list.
    TodosLoaded {
        /// Items in server order.
        todos: Vec<TodoItem>,
    },
    /// A create call finished; appends the returned item.
    TodoCreated {
        /// The item with its server-assigned id.
        item: TodoItem,
    },
    /// A delete call finished; removes the item.
    TodoDeleted {
        /// Id of the deleted todo.
        id: TodoId,
    },
    /// An operation failed.
    OperationFailed {
        /// User-facing failure text.
        message: String,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the UI should be redrawn, and the side effects
/// to run in order.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for validation that needs to
/// reject an event outright.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.pending && event.starts_operation() {
        tracing::debug!("operation in flight, ignoring input");
        return Ok((false, vec![]));
    }

    match event {
        Event::Mounted | Event::Reload => {
            state.last_error = None;
            Ok((true, vec![Action::LoadTodos {
                backend: state.backend,
            }]))
        }
        Event::SelectBackend(backend) => {
            if *backend == state.backend {
                tracing::debug!(backend = %backend, "backend unchanged, skipping reload");
                return Ok((false, vec![]));
            }

            tracing::debug!(from = %state.backend, to = %backend, "switching backend");
            state.backend = *backend;
            state.todos.clear();
            state.last_error = None;

            Ok((true, vec![Action::LoadTodos { backend: *backend }]))
        }
        Event::Submit { name } => {
            if name.trim().is_empty() {
                tracing::debug!("ignoring blank todo name");
                return Ok((false, vec![]));
            }

            state.last_error = None;
            Ok((true, vec![Action::CreateTodo {
                backend: state.backend,
                name: name.clone(),
            }]))
        }
        Event::Delete { id } => Ok((false, vec![Action::DeleteTodo {
            backend: state.backend,
            id: id.clone(),
        }])),
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::TodosLoaded { todos } => {
            tracing::debug!(count = todos.len(), "todos loaded");
            state.replace_todos(todos.clone());
            Ok((true, vec![]))
        }
        Event::TodoCreated { item } => {
            tracing::debug!(id = %item.id, "todo created");
            state.append_todo(item.clone());
            Ok((true, vec![]))
        }
        Event::TodoDeleted { id } => {
            if !state.remove_todo(id) {
                tracing::debug!(id = %id, "deleted todo was not in the cached list");
            }
            Ok((true, vec![]))
        }
        Event::OperationFailed { message } => {
            tracing::warn!(error = %message, "operation failed");
            state.last_error = Some(message.clone());
            Ok((true, vec![]))
        }
    }
}

impl Event {
    /// Whether handling this event may issue a backend call.
    const fn starts_operation(&self) -> bool {
        matches!(
            self,
            Self::Mounted
                | Self::Reload
                | Self::SelectBackend(_)
                | Self::Submit { .. }
                | Self::Delete { .. }
        )
    }
}
