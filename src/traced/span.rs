//! Span lifecycle for a single traced operation.
//!
//! An [`OperationSpan`] is opened before the gateway call and consumed by either
//! [`OperationSpan::succeed`] or [`OperationSpan::fail`]. If neither runs (the
//! call panicked, or the future was dropped mid-flight) `Drop` closes the span,
//! so every invocation ends its span exactly once. A panic is recorded as a
//! failure; a dropped future is not.

use opentelemetry::trace::{Span as _, Status, TraceContextExt as _, Tracer as _};
use opentelemetry::{Context, KeyValue};
use opentelemetry_sdk::trace::{Span, Tracer};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::domain::{Backend, OperationKind, TodoError};

/// Value of the `component` attribute on every operation span.
const COMPONENT: &str = "TodoList";

const PANIC_MESSAGE: &str = "operation panicked";

/// Where an operation span is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanPhase {
    /// Opened, the gateway call has not finished.
    Open,
    /// The call succeeded and the span has been annotated.
    Succeeded,
    /// The call failed and the error has been recorded.
    Failed,
    /// Ended; nothing more can be written.
    Closed,
}

/// Guard owning the OpenTelemetry span of one operation invocation.
pub struct OperationSpan {
    kind: OperationKind,
    span: Option<Span>,
    phase: SpanPhase,
}

impl OperationSpan {
    /// Starts the span and tags it with the operation metadata.
    ///
    /// The span is parented on the OpenTelemetry context of the current
    /// `tracing` span, if any.
    pub fn open(
        tracer: &Tracer,
        kind: OperationKind,
        backend: Backend,
        attributes: Vec<KeyValue>,
    ) -> Self {
        let parent = tracing::Span::current().context();
        let mut span = tracer.start_with_context(kind.span_name(), &parent);

        span.set_attribute(KeyValue::new("user.action", kind.span_name()));
        span.set_attribute(KeyValue::new("component", COMPONENT));
        span.set_attribute(KeyValue::new("backend", backend.as_str()));
        span.set_attributes(attributes);

        tracing::debug!(operation = %kind, backend = %backend, "operation span opened");

        Self {
            kind,
            span: Some(span),
            phase: SpanPhase::Open,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> SpanPhase {
        self.phase
    }

    /// Context carrying this span, for propagation to outgoing requests.
    #[must_use]
    pub fn context(&self) -> Context {
        let cx = Context::current();
        match &self.span {
            Some(span) => cx.with_remote_span_context(span.span_context().clone()),
            None => cx,
        }
    }

    /// Records the completion event and result attributes, then closes.
    pub fn succeed(mut self, attributes: Vec<KeyValue>) {
        if let Some(span) = self.span.as_mut() {
            span.add_event(self.kind.success_event(), Vec::new());
            span.set_attributes(attributes);
            span.set_status(Status::Ok);
        }
        self.phase = SpanPhase::Succeeded;
        self.close();
    }

    /// Records the error as an exception with an error status, then closes.
    pub fn fail(mut self, error: &TodoError) {
        if let Some(span) = self.span.as_mut() {
            span.record_error(error);
            span.set_status(Status::error(error.to_string()));
        }
        self.phase = SpanPhase::Failed;
        self.close();
    }

    fn close(&mut self) {
        if let Some(mut span) = self.span.take() {
            span.end();
            tracing::debug!(operation = %self.kind, outcome = ?self.phase, "operation span closed");
            self.phase = SpanPhase::Closed;
        }
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        if let Some(span) = self.span.as_mut() {
            if std::thread::panicking() {
                span.add_event(
                    "exception",
                    vec![KeyValue::new("exception.message", PANIC_MESSAGE)],
                );
                span.set_status(Status::error(PANIC_MESSAGE));
                self.phase = SpanPhase::Failed;
            } else {
                tracing::debug!(operation = %self.kind, "operation abandoned before completion");
            }
            self.close();
        }
    }
}

impl std::fmt::Debug for OperationSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationSpan")
            .field("kind", &self.kind)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
