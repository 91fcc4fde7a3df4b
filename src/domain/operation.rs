//! User-facing operations the client can perform against a backend.

use std::fmt;

/// The three traced operations.
///
/// Each kind carries its span name (also used as the `user.action` attribute),
/// the event recorded on success, and the prefix used for user-facing failure
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    LoadTodos,
    CreateTodo,
    DeleteTodo,
}

impl OperationKind {
    /// Span name and `user.action` attribute value.
    #[must_use]
    pub const fn span_name(self) -> &'static str {
        match self {
            Self::LoadTodos => "load_todos",
            Self::CreateTodo => "create_todo",
            Self::DeleteTodo => "delete_todo",
        }
    }

    /// Event added to the span when the operation succeeds.
    #[must_use]
    pub const fn success_event(self) -> &'static str {
        match self {
            Self::LoadTodos => "Todos loaded successfully",
            Self::CreateTodo => "Todo created successfully",
            Self::DeleteTodo => "Todo deleted successfully",
        }
    }

    /// Leading words of the failure message, completed by the backend name.
    #[must_use]
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::LoadTodos => "Failed to load todos from",
            Self::CreateTodo => "Failed to create todo in",
            Self::DeleteTodo => "Failed to delete todo from",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.span_name())
    }
}
