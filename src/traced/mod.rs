//! Traced wrapper around gateway calls.
//!
//! [`TracedOperations`] runs each gateway call inside an OpenTelemetry span:
//!
//! ```text
//! OPEN ──call ok──▶ SUCCEEDED ──┐
//!   │                           ├──▶ CLOSED
//!   └──call err──▶ FAILED ──────┘
//! ```
//!
//! The tracer is handed in at construction; nothing here reads a global
//! provider. Errors are annotated on the span and returned unchanged.
//!
//! The gateway call runs with the span attached as the current OpenTelemetry
//! context, so outgoing requests carry it as a W3C `traceparent` header.

mod span;

pub use span::{OperationSpan, SpanPhase};

use opentelemetry::trace::FutureExt as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::trace::Tracer;

use crate::domain::{OperationKind, Result, TodoId, TodoItem};
use crate::gateway::TodoGateway;

/// Runs gateway calls inside operation spans.
///
/// # Example
///
/// ```no_run
/// use opentelemetry::trace::TracerProvider as _;
/// use todo_tracer::gateway::{Gateways, TodoGateway};
/// use todo_tracer::domain::Backend;
/// use todo_tracer::traced::TracedOperations;
///
/// # async fn demo(gateways: Gateways) -> todo_tracer::Result<()> {
/// let provider = opentelemetry_sdk::trace::TracerProvider::builder().build();
/// let operations = TracedOperations::new(provider.tracer("todo-frontend"));
///
/// let todos = operations.list(gateways.get(Backend::Go)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TracedOperations {
    tracer: Tracer,
}

impl TracedOperations {
    /// Creates the wrapper around an explicitly provided tracer.
    #[must_use]
    pub const fn new(tracer: Tracer) -> Self {
        Self { tracer }
    }

    /// Lists todos inside a `load_todos` span.
    ///
    /// On success the span carries `todos.count`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error unchanged after recording it on the span.
    pub async fn list(&self, gateway: &dyn TodoGateway) -> Result<Vec<TodoItem>> {
        let span = OperationSpan::open(
            &self.tracer,
            OperationKind::LoadTodos,
            gateway.backend(),
            Vec::new(),
        );

        let outcome = gateway.list().with_context(span.context()).await;
        finish(span, outcome, |todos| {
            vec![KeyValue::new("todos.count", count_value(todos.len()))]
        })
    }

    /// Creates a todo inside a `create_todo` span.
    ///
    /// The span carries `todo.name` and `todo.name.length`, and on success the
    /// server-assigned `todo.id`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error unchanged after recording it on the span.
    pub async fn create(&self, gateway: &dyn TodoGateway, name: &str) -> Result<TodoItem> {
        let span = OperationSpan::open(
            &self.tracer,
            OperationKind::CreateTodo,
            gateway.backend(),
            vec![
                KeyValue::new("todo.name", name.to_string()),
                KeyValue::new("todo.name.length", count_value(name.chars().count())),
            ],
        );

        let outcome = gateway.create(name).with_context(span.context()).await;
        finish(span, outcome, |item| {
            vec![
                KeyValue::new("todo.id", item.id.to_string()),
                KeyValue::new("operation.result", "success"),
            ]
        })
    }

    /// Deletes a todo inside a `delete_todo` span carrying `todo.id`.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error unchanged after recording it on the span.
    pub async fn delete(&self, gateway: &dyn TodoGateway, id: &TodoId) -> Result<()> {
        let span = OperationSpan::open(
            &self.tracer,
            OperationKind::DeleteTodo,
            gateway.backend(),
            vec![KeyValue::new("todo.id", id.to_string())],
        );

        let outcome = gateway.delete(id).with_context(span.context()).await;
        finish(span, outcome, |_| {
            vec![KeyValue::new("operation.result", "success")]
        })
    }
}

impl std::fmt::Debug for TracedOperations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracedOperations").finish_non_exhaustive()
    }
}

/// Moves the span to its terminal phase and hands the outcome back.
fn finish<T>(
    span: OperationSpan,
    outcome: Result<T>,
    attributes: impl FnOnce(&T) -> Vec<KeyValue>,
) -> Result<T> {
    match outcome {
        Ok(value) => {
            span.succeed(attributes(&value));
            Ok(value)
        }
        Err(error) => {
            tracing::debug!(error = %error, "traced operation failed");
            span.fail(&error);
            Err(error)
        }
    }
}

fn count_value(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
