//! Application layer coordinating state, events, and actions.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions
//!                  ↑                                         ↓
//!                  └──── Completion ←── Dispatcher (traced gateway call)
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Backend calls requested by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`runtime`]: Action execution through the traced wrapper
//! - [`state`]: UI state, pending guard, view model computation

pub mod actions;
pub mod handler;
pub mod runtime;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use runtime::Dispatcher;
pub use state::{AppState, PendingGuard};
