//! Span-per-operation guarantees of the traced wrapper.

mod common;

use std::panic::AssertUnwindSafe;
use std::time::Duration;

use common::{attr, event_names, Behaviour, FakeGateway, SpanRecorder};
use futures_util::FutureExt;
use opentelemetry::trace::Status;
use opentelemetry::Value;

use todo_tracer::domain::{Backend, OperationKind, TodoId};
use todo_tracer::gateway::TodoGateway;
use todo_tracer::traced::TracedOperations;

fn text(value: Option<Value>) -> Option<String> {
    value.map(|v| v.as_str().into_owned())
}

#[tokio::test]
async fn successful_list_ends_one_span_with_count() {
    let recorder = SpanRecorder::new();
    let ops = TracedOperations::new(recorder.tracer());
    let gateway = FakeGateway::new(Backend::Go);
    gateway.create("milk").await.unwrap();
    gateway.create("eggs").await.unwrap();

    let todos = ops.list(&gateway).await.unwrap();

    assert_eq!(todos.len(), 2);
    let spans = recorder.spans();
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.name, "load_todos");
    assert_eq!(text(attr(span, "backend")).as_deref(), Some("go"));
    assert_eq!(text(attr(span, "component")).as_deref(), Some("TodoList"));
    assert_eq!(text(attr(span, "user.action")).as_deref(), Some("load_todos"));
    assert_eq!(attr(span, "todos.count"), Some(Value::I64(2)));
    assert_eq!(event_names(span), vec!["Todos loaded successfully"]);
    assert_eq!(span.status, Status::Ok);
}

#[tokio::test]
async fn successful_create_records_name_and_assigned_id() {
    let recorder = SpanRecorder::new();
    let ops = TracedOperations::new(recorder.tracer());
    let gateway = FakeGateway::new(Backend::Java);

    let item = ops.create(&gateway, "oat milk").await.unwrap();

    let spans = recorder.spans();
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.name, "create_todo");
    assert_eq!(text(attr(span, "backend")).as_deref(), Some("java"));
    assert_eq!(text(attr(span, "todo.name")).as_deref(), Some("oat milk"));
    assert_eq!(attr(span, "todo.name.length"), Some(Value::I64(8)));
    assert_eq!(text(attr(span, "todo.id")), Some(item.id.to_string()));
    assert_eq!(text(attr(span, "operation.result")).as_deref(), Some("success"));
    assert_eq!(event_names(span), vec!["Todo created successfully"]);
}

#[tokio::test]
async fn successful_delete_records_id() {
    let recorder = SpanRecorder::new();
    let ops = TracedOperations::new(recorder.tracer());
    let gateway = FakeGateway::new(Backend::Go);
    let item = gateway.create("milk").await.unwrap();

    ops.delete(&gateway, &item.id).await.unwrap();

    let spans = recorder.spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].name, "delete_todo");
    assert_eq!(text(attr(&spans[0], "todo.id")), Some(item.id.to_string()));
    assert_eq!(event_names(&spans[0]), vec!["Todo deleted successfully"]);
    assert!(gateway.stored().is_empty());
}

#[tokio::test]
async fn failure_records_exception_and_error_status() {
    let recorder = SpanRecorder::new();
    let ops = TracedOperations::new(recorder.tracer());
    let gateway = FakeGateway::new(Backend::Java);
    gateway.set_behaviour(Behaviour::Fail("HTTP 503 Service Unavailable".into()));

    let err = ops.create(&gateway, "milk").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to create todo in java service: HTTP 503 Service Unavailable"
    );
    let spans = recorder.spans();
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(event_names(span), vec!["exception"]);
    assert_eq!(attr(span, "operation.result"), None);
    assert!(matches!(
        &span.status,
        Status::Error { description } if description.contains("java service")
    ));
}

#[tokio::test]
async fn panicking_gateway_ends_the_span_as_failed() {
    let recorder = SpanRecorder::new();
    let ops = TracedOperations::new(recorder.tracer());
    let gateway = FakeGateway::new(Backend::Go);
    gateway.set_behaviour(Behaviour::Panic);

    let outcome = AssertUnwindSafe(ops.list(&gateway)).catch_unwind().await;

    assert!(outcome.is_err());
    let spans = recorder.spans();
    assert_eq!(spans.len(), 1);
    let span = &spans[0];
    assert_eq!(span.name, "load_todos");
    assert_eq!(event_names(span), vec!["exception"]);
    assert!(matches!(
        &span.status,
        Status::Error { description } if description == "operation panicked"
    ));
}

#[tokio::test]
async fn dropped_call_still_ends_the_span() {
    let recorder = SpanRecorder::new();
    let ops = TracedOperations::new(recorder.tracer());
    let gateway = FakeGateway::new(Backend::Java);
    gateway.set_behaviour(Behaviour::Hang);

    let outcome =
        tokio::time::timeout(Duration::from_millis(20), ops.delete(&gateway, &TodoId::from(1)))
            .await;

    assert!(outcome.is_err());
    let spans = recorder.spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].name, "delete_todo");
    assert_eq!(spans[0].status, Status::Unset);
    assert!(event_names(&spans[0]).is_empty());
}

#[tokio::test]
async fn every_invocation_gets_its_own_span() {
    let recorder = SpanRecorder::new();
    let ops = TracedOperations::new(recorder.tracer());
    let gateway = FakeGateway::new(Backend::Go);

    let first = ops.create(&gateway, "milk").await.unwrap();
    ops.create(&gateway, "eggs").await.unwrap();
    ops.list(&gateway).await.unwrap();
    ops.delete(&gateway, &first.id).await.unwrap();
    gateway.set_behaviour(Behaviour::Fail("HTTP 500".into()));
    ops.list(&gateway).await.unwrap_err();

    assert_eq!(
        recorder.span_names(),
        vec![
            "create_todo",
            "create_todo",
            "load_todos",
            "delete_todo",
            "load_todos"
        ]
    );
    assert_eq!(
        gateway.calls(),
        vec![
            OperationKind::CreateTodo,
            OperationKind::CreateTodo,
            OperationKind::LoadTodos,
            OperationKind::DeleteTodo,
            OperationKind::LoadTodos,
        ]
    );
    let ids = recorder
        .spans()
        .iter()
        .map(|span| span.span_context.span_id())
        .collect::<std::collections::HashSet<_>>();
    assert_eq!(ids.len(), 5);
}
