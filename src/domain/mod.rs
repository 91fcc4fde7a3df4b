//! Domain layer for the todo client.
//!
//! Core types independent of HTTP, telemetry, or terminal concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`operation`]: The traced operations and their naming
//! - [`todo`]: Todo items, identifiers and backend selection
//!
//! # Examples
//!
//! ```
//! use todo_tracer::domain::{Backend, Result, TodoItem};
//!
//! fn first_for(backend: Backend) -> Result<TodoItem> {
//!     Ok(TodoItem::new(1, format!("buy milk via {backend}")))
//! }
//! ```

pub mod error;
pub mod operation;
pub mod todo;

pub use error::{Result, TodoError};
pub use operation::OperationKind;
pub use todo::{Backend, TodoId, TodoItem};
