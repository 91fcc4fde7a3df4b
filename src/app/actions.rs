//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never performs I/O. It returns [`Action`]s describing the
//! backend call to make; the [`crate::app::Dispatcher`] executes them through
//! the traced wrapper and feeds the outcome back as a completion event.
//!
//! # Example
//!
//! ```rust
//! use todo_tracer::app::Action;
//! use todo_tracer::domain::Backend;
//!
//! let actions = vec![Action::LoadTodos { backend: Backend::Go }];
//! ```

use crate::domain::{Backend, TodoId};

/// Commands produced by the event handler.
///
/// Every backend action carries the backend that was selected when it was
/// issued, so a later selector change cannot reroute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch the full list from `backend`.
    LoadTodos { backend: Backend },

    /// Create a todo named `name` on `backend`.
    CreateTodo { backend: Backend, name: String },

    /// Delete the todo `id` from `backend`.
    DeleteTodo { backend: Backend, id: TodoId },

    /// Stop the UI loop.
    Quit,
}
