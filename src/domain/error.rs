//! Error types for the todo client.
//!
//! This module defines the centralized error type [`TodoError`] and a type alias
//! [`Result`] used throughout the crate. Gateway failures carry the backend they
//! came from so the text shown to the user always names the selected service.

use thiserror::Error;

use super::operation::OperationKind;
use super::todo::Backend;

/// The main error type for todo client operations.
///
/// # Examples
///
/// ```
/// use todo_tracer::domain::{Backend, OperationKind, TodoError};
///
/// let err = TodoError::Transport {
///     backend: Backend::Java,
///     operation: OperationKind::CreateTodo,
///     reason: "HTTP 500 Internal Server Error".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Failed to create todo in java service: HTTP 500 Internal Server Error"
/// );
/// ```
#[derive(Debug, Error)]
pub enum TodoError {
    /// The backend answered with a non-success status, or could not be reached.
    ///
    /// The message names the backend so it can be shown to the user as is.
    #[error("{} {backend} service: {reason}", .operation.failure_prefix())]
    Transport {
        backend: Backend,
        operation: OperationKind,
        reason: String,
    },

    /// The backend answered successfully but the body was not the expected shape.
    #[error("Malformed response from {backend} service: {reason}")]
    MalformedResponse { backend: Backend, reason: String },

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The telemetry pipeline could not be set up or shut down.
    #[error("Telemetry error: {0}")]
    Telemetry(String),

    /// Terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TodoError {
    /// Backend the error originated from, if it came from a gateway call.
    #[must_use]
    pub const fn backend(&self) -> Option<Backend> {
        match self {
            Self::Transport { backend, .. } | Self::MalformedResponse { backend, .. } => {
                Some(*backend)
            }
            Self::Config(_) | Self::Telemetry(_) | Self::Io(_) => None,
        }
    }
}

/// A specialized `Result` type for todo client operations.
pub type Result<T> = std::result::Result<T, TodoError>;
