//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → text
//! stdin line → parse_line → Command → Event
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Plain-text rendering
//! - [`input`]: Command parsing

pub mod input;
pub mod renderer;
pub mod viewmodel;

pub use input::{parse_line, Command};
pub use renderer::render;
pub use viewmodel::{EmptyState, FooterInfo, HeaderInfo, TodoRow, UIViewModel};
