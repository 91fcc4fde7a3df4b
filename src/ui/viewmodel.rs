//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready text.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Heading with backend name and item count.
    pub header: HeaderInfo,

    /// One row per cached todo, in list order.
    pub rows: Vec<TodoRow>,

    /// Last failure, shown above the list.
    pub error_banner: Option<String>,

    /// Progress text while an operation is in flight.
    pub status_line: Option<String>,

    /// Shown instead of rows when the list is empty and nothing is loading.
    pub empty_state: Option<EmptyState>,

    /// Command help.
    pub footer: FooterInfo,
}

/// A single todo row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRow {
    /// Id the user types to delete this row.
    pub id: String,

    /// Todo name.
    pub name: String,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// e.g. "Todos from Go Service (2)".
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command help text.
    pub keybindings: String,
}

/// Empty list message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Message shown in place of rows.
    pub message: String,
}
