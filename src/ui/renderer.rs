//! Top-level rendering coordinator.
//!
//! Computes the view model from application state and writes it as plain text.
//! Output goes to any `Write`, so the terminal front-end passes stdout and
//! tests pass a buffer.
//!
//! # Layout
//!
//! ```text
//! == Todos from Go Service (2) ==
//! ! Failed to create todo in go service: HTTP 500 Internal Server Error
//! Loading...
//!   [1] milk
//!   [2] eggs
//! -- add <name> | rm <id> | backend go|java | reload | help | quit
//! ```

use std::io::{self, Write};

use crate::app::AppState;
use crate::ui::viewmodel::UIViewModel;

/// Renders the UI for `state` into `out`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
///
/// # Example
///
/// ```rust
/// use todo_tracer::app::AppState;
/// use todo_tracer::ui::render;
///
/// let mut out = Vec::new();
/// render(&AppState::default(), &mut out).unwrap();
/// assert!(String::from_utf8(out).unwrap().contains("No todos yet"));
/// ```
pub fn render(state: &AppState, out: &mut impl Write) -> io::Result<()> {
    let viewmodel = state.compute_viewmodel();
    render_viewmodel(&viewmodel, out)
}

fn render_viewmodel(vm: &UIViewModel, out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "== {} ==", vm.header.title)?;

    if let Some(error) = &vm.error_banner {
        writeln!(out, "! {error}")?;
    }

    if let Some(status) = &vm.status_line {
        writeln!(out, "{status}")?;
    }

    if let Some(empty) = &vm.empty_state {
        writeln!(out, "  {}", empty.message)?;
    } else {
        let id_width = vm.rows.iter().map(|row| row.id.len()).max().unwrap_or(0);
        for row in &vm.rows {
            writeln!(out, "  [{:>id_width$}] {}", row.id, row.name)?;
        }
    }

    writeln!(out, "-- {}", vm.footer.keybindings)?;
    out.flush()
}
