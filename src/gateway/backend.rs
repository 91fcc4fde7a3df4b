//! Backend gateway abstraction.
//!
//! This module defines the [`TodoGateway`] trait, the capability every todo
//! service exposes to the client. Business logic only ever talks to this trait,
//! so the Go and Java services (or an in-memory fake) are interchangeable.
//!
//! # Design Philosophy
//!
//! The trait mirrors exactly the three calls the UI needs. It is not a generic
//! REST client: each method maps directly to one user action.

use async_trait::async_trait;

use crate::domain::{Backend, Result, TodoId, TodoItem};

/// Capability to list, create and delete todos on one backend.
///
/// Implementations must surface failures immediately: no retries, no caching.
/// Errors must name [`TodoGateway::backend`] so they can be shown to the user
/// without further decoration.
///
/// # Implementations
///
/// - [`crate::gateway::HttpGateway`]: talks to a service over HTTP
///
/// # Examples
///
/// ```no_run
/// use todo_tracer::gateway::{HttpGateway, TodoGateway};
/// use todo_tracer::domain::Backend;
///
/// # async fn demo() -> todo_tracer::Result<()> {
/// let origin = url::Url::parse("http://localhost:8080").unwrap();
/// let gateway = HttpGateway::new(reqwest::Client::new(), &origin, Backend::Go)?;
/// let todos = gateway.list().await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TodoGateway: Send + Sync {
    /// The backend this gateway routes to.
    fn backend(&self) -> Backend;

    /// Fetches every todo held by the backend.
    ///
    /// A body that is not a JSON array is treated as an empty list.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on a non-success status or network failure, and
    /// `MalformedResponse` when an array element is not a valid todo.
    async fn list(&self) -> Result<Vec<TodoItem>>;

    /// Creates a todo and returns it with its server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on a non-success status or network failure, and
    /// `MalformedResponse` when the created item lacks a valid `id` or `name`.
    async fn create(&self, name: &str) -> Result<TodoItem>;

    /// Deletes the todo with the given id.
    ///
    /// # Errors
    ///
    /// Returns `Transport` on a non-success status or network failure.
    async fn delete(&self, id: &TodoId) -> Result<()>;
}
