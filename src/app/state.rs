//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for what the UI shows: the cached
//! todo list, the in-flight flag, the last error, and the selected backend. The
//! gateway never reads it; only the event handler and the pending guard write
//! to it.

use std::ops::{Deref, DerefMut};

use crate::domain::{Backend, TodoId, TodoItem};
use crate::ui::viewmodel::{EmptyState, FooterInfo, HeaderInfo, TodoRow, UIViewModel};

/// Keybinding help shown at the bottom of the list.
const FOOTER_HELP: &str = "add <name> | rm <id> | backend go|java | reload | help | quit";

/// Central application state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Cached copy of the backend's todos, in server order plus local appends.
    pub todos: Vec<TodoItem>,

    /// True while an operation is in flight.
    ///
    /// Only [`PendingGuard`] sets and clears it.
    pub pending: bool,

    /// User-facing text of the most recent failure.
    pub last_error: Option<String>,

    /// Backend every new operation is routed to.
    pub backend: Backend,
}

impl AppState {
    /// Creates an empty state targeting `backend`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use todo_tracer::app::AppState;
    /// use todo_tracer::domain::Backend;
    ///
    /// let state = AppState::new(Backend::Java);
    /// assert!(state.todos.is_empty());
    /// assert!(!state.pending);
    /// ```
    #[must_use]
    pub const fn new(backend: Backend) -> Self {
        Self {
            todos: Vec::new(),
            pending: false,
            last_error: None,
            backend,
        }
    }

    /// Marks an operation as in flight until the returned guard is dropped.
    ///
    /// The guard dereferences to the state so completion handling can run
    /// while it is held.
    pub fn begin_operation(&mut self) -> PendingGuard<'_> {
        self.pending = true;
        PendingGuard { state: self }
    }

    /// Replaces the cached list wholesale.
    pub fn replace_todos(&mut self, todos: Vec<TodoItem>) {
        self.todos = todos;
    }

    /// Appends a newly created item at the end of the list.
    pub fn append_todo(&mut self, item: TodoItem) {
        self.todos.push(item);
    }

    /// Removes the item with `id`, leaving items with the same name untouched.
    ///
    /// Returns `true` if an item was removed.
    pub fn remove_todo(&mut self, id: &TodoId) -> bool {
        let before = self.todos.len();
        self.todos.retain(|todo| &todo.id != id);
        self.todos.len() != before
    }

    /// Computes the renderable view of the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let header = HeaderInfo {
            title: format!(
                "Todos from {} Service ({})",
                self.backend.display_name(),
                self.todos.len()
            ),
        };

        let rows: Vec<TodoRow> = self
            .todos
            .iter()
            .map(|todo| TodoRow {
                id: todo.id.to_string(),
                name: todo.name.clone(),
            })
            .collect();

        let empty_state = (rows.is_empty() && !self.pending).then(|| EmptyState {
            message: "No todos yet. Add one above!".to_string(),
        });

        UIViewModel {
            header,
            rows,
            error_banner: self.last_error.clone(),
            status_line: self.pending.then(|| "Loading...".to_string()),
            empty_state,
            footer: FooterInfo {
                keybindings: FOOTER_HELP.to_string(),
            },
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Backend::default())
    }
}

/// Scoped in-flight marker.
///
/// Sets [`AppState::pending`] on creation and clears it on drop, so the flag
/// is reset on every exit path, including early returns and panics.
#[derive(Debug)]
pub struct PendingGuard<'a> {
    state: &'a mut AppState,
}

impl Deref for PendingGuard<'_> {
    type Target = AppState;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for PendingGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.state.pending = false;
    }
}
