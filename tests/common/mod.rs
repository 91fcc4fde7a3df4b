//! Shared fixtures for integration tests.
//!
//! - [`FakeService`]: an axum server speaking the Go and Java todo contracts
//! - [`FakeGateway`]: an in-memory gateway with scriptable failures
//! - [`SpanRecorder`]: a tracer whose finished spans can be inspected

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use futures_util::future::BoxFuture;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::Value;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::trace::{Tracer, TracerProvider};
use serde_json::{json, Value as JsonValue};
use url::Url;

use todo_tracer::domain::{Backend, OperationKind, TodoId, TodoItem};
use todo_tracer::gateway::TodoGateway;
use todo_tracer::{Result, TodoError};

// ---------------------------------------------------------------------------
// Fake HTTP service
// ---------------------------------------------------------------------------

/// One request seen by the fake service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: &'static str,
    pub path: String,
}

#[derive(Default)]
struct ServiceState {
    todos: Mutex<HashMap<String, Vec<(JsonValue, String)>>>,
    requests: Mutex<Vec<Recorded>>,
    traceparents: Mutex<Vec<Option<String>>>,
    numeric_ids: AtomicBool,
    failure: Mutex<Option<StatusCode>>,
    list_body: Mutex<Option<String>>,
    traces: Mutex<Vec<JsonValue>>,
    next_id: AtomicU64,
}

impl ServiceState {
    fn record(&self, method: &'static str, path: String, headers: &HeaderMap) {
        self.requests.lock().unwrap().push(Recorded { method, path });
        let traceparent = headers
            .get("traceparent")
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        self.traceparents.lock().unwrap().push(traceparent);
    }

    fn failure(&self) -> Option<StatusCode> {
        *self.failure.lock().unwrap()
    }

    fn next_id(&self, backend: &str) -> JsonValue {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        if backend == "go" && !self.numeric_ids.load(Ordering::SeqCst) {
            json!(format!("4f1c2e9a-0000-4000-8000-{n:012x}"))
        } else {
            json!(n)
        }
    }
}

fn id_text(id: &JsonValue) -> String {
    match id {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn known(backend: &str) -> bool {
    matches!(backend, "go" | "java")
}

/// Axum server mimicking both todo services plus a trace collector.
///
/// - `GET /{backend}/todos`: Go answers `null` when empty, Java `[]`
/// - `POST /{backend}/todos`: Go answers 201 with a UUID id, Java 200 with a number
/// - `DELETE /{backend}/todos/{id}`: 204, or 404 for an unknown id
/// - `POST /v1/traces`: stores the OTLP JSON document
pub struct FakeService {
    pub addr: SocketAddr,
    state: Arc<ServiceState>,
}

impl FakeService {
    pub async fn start() -> Self {
        let state = Arc::new(ServiceState::default());
        let app = Router::new()
            .route("/{backend}/todos", get(list_todos).post(create_todo))
            .route("/{backend}/todos/{id}", delete(delete_todo))
            .route("/v1/traces", post(collect_traces))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn origin(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// Makes every todo route answer with `status` until cleared.
    pub fn fail_with(&self, status: Option<StatusCode>) {
        *self.state.failure.lock().unwrap() = status;
    }

    /// Overrides the raw list body for both backends.
    pub fn set_list_body(&self, body: Option<&str>) {
        *self.state.list_body.lock().unwrap() = body.map(String::from);
    }

    /// Seeds a backend's store directly.
    pub fn seed(&self, backend: &str, names: &[&str]) {
        for name in names {
            let id = self.state.next_id(backend);
            self.state
                .todos
                .lock()
                .unwrap()
                .entry(backend.to_string())
                .or_default()
                .push((id, (*name).to_string()));
        }
    }

    /// Seeds one item with a numeric id; later ids continue from it.
    ///
    /// Switches the Go service to numeric ids as well.
    pub fn seed_numbered(&self, backend: &str, id: u64, name: &str) {
        self.state.numeric_ids.store(true, Ordering::SeqCst);
        self.state.next_id.fetch_max(id, Ordering::SeqCst);
        self.state
            .todos
            .lock()
            .unwrap()
            .entry(backend.to_string())
            .or_default()
            .push((json!(id), name.to_string()));
    }

    /// `traceparent` header of each request, in arrival order.
    pub fn traceparents(&self) -> Vec<Option<String>> {
        self.state.traceparents.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().unwrap().clear();
        self.state.traceparents.lock().unwrap().clear();
    }

    pub fn stored_names(&self, backend: &str) -> Vec<String> {
        self.state
            .todos
            .lock()
            .unwrap()
            .get(backend)
            .map(|todos| todos.iter().map(|(_, name)| name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn traces(&self) -> Vec<JsonValue> {
        self.state.traces.lock().unwrap().clone()
    }
}

async fn list_todos(
    State(state): State<Arc<ServiceState>>,
    Path(backend): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.record("GET", format!("/{backend}/todos"), &headers);
    if !known(&backend) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(status) = state.failure() {
        return status.into_response();
    }
    if let Some(body) = state.list_body.lock().unwrap().clone() {
        return ([(header::CONTENT_TYPE, "application/json")], body).into_response();
    }

    let todos = state
        .todos
        .lock()
        .unwrap()
        .get(&backend)
        .cloned()
        .unwrap_or_default();

    if todos.is_empty() && backend == "go" {
        return Json(JsonValue::Null).into_response();
    }

    let body = todos
        .into_iter()
        .map(|(id, name)| json!({ "id": id, "name": name }))
        .collect::<Vec<_>>();
    Json(body).into_response()
}

async fn create_todo(
    State(state): State<Arc<ServiceState>>,
    Path(backend): Path<String>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> Response {
    state.record("POST", format!("/{backend}/todos"), &headers);
    if !known(&backend) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(status) = state.failure() {
        return status.into_response();
    }

    let name = body["name"].as_str().unwrap_or_default().to_string();
    let id = state.next_id(&backend);
    state
        .todos
        .lock()
        .unwrap()
        .entry(backend.clone())
        .or_default()
        .push((id.clone(), name.clone()));

    let status = if backend == "go" {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, Json(json!({ "id": id, "name": name }))).into_response()
}

async fn delete_todo(
    State(state): State<Arc<ServiceState>>,
    Path((backend, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    state.record("DELETE", format!("/{backend}/todos/{id}"), &headers);
    if !known(&backend) {
        return StatusCode::NOT_FOUND.into_response();
    }
    if let Some(status) = state.failure() {
        return status.into_response();
    }

    let mut todos = state.todos.lock().unwrap();
    let list = todos.entry(backend).or_default();
    match list.iter().position(|(stored, _)| id_text(stored) == id) {
        Some(index) => {
            list.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn collect_traces(
    State(state): State<Arc<ServiceState>>,
    Json(body): Json<JsonValue>,
) -> StatusCode {
    state.traces.lock().unwrap().push(body);
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// In-memory gateway
// ---------------------------------------------------------------------------

/// How [`FakeGateway`] answers the next calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behaviour {
    Normal,
    Fail(String),
    Panic,
    Hang,
}

/// Gateway keeping todos in memory with sequential numeric ids.
pub struct FakeGateway {
    backend: Backend,
    todos: Mutex<Vec<TodoItem>>,
    next_id: AtomicU64,
    behaviour: Mutex<Behaviour>,
    calls: Mutex<Vec<OperationKind>>,
}

impl FakeGateway {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            todos: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            behaviour: Mutex::new(Behaviour::Normal),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_behaviour(&self, behaviour: Behaviour) {
        *self.behaviour.lock().unwrap() = behaviour;
    }

    pub fn calls(&self) -> Vec<OperationKind> {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self) -> Vec<TodoItem> {
        self.todos.lock().unwrap().clone()
    }

    async fn enter(&self, operation: OperationKind) -> Result<()> {
        self.calls.lock().unwrap().push(operation);
        let behaviour = self.behaviour.lock().unwrap().clone();
        match behaviour {
            Behaviour::Normal => Ok(()),
            Behaviour::Fail(reason) => Err(TodoError::Transport {
                backend: self.backend,
                operation,
                reason,
            }),
            Behaviour::Panic => panic!("gateway exploded during {operation}"),
            Behaviour::Hang => std::future::pending::<Result<()>>().await,
        }
    }
}

#[async_trait]
impl TodoGateway for FakeGateway {
    fn backend(&self) -> Backend {
        self.backend
    }

    async fn list(&self) -> Result<Vec<TodoItem>> {
        self.enter(OperationKind::LoadTodos).await?;
        Ok(self.stored())
    }

    async fn create(&self, name: &str) -> Result<TodoItem> {
        self.enter(OperationKind::CreateTodo).await?;
        let id = i64::try_from(self.next_id.fetch_add(1, Ordering::SeqCst) + 1).unwrap();
        let item = TodoItem::new(id, name);
        self.todos.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn delete(&self, id: &TodoId) -> Result<()> {
        self.enter(OperationKind::DeleteTodo).await?;
        let mut todos = self.todos.lock().unwrap();
        match todos.iter().position(|todo| &todo.id == id) {
            Some(index) => {
                todos.remove(index);
                Ok(())
            }
            None => Err(TodoError::Transport {
                backend: self.backend,
                operation: OperationKind::DeleteTodo,
                reason: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Span recording
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
struct RecordingExporter {
    spans: Arc<Mutex<Vec<SpanData>>>,
}

impl SpanExporter for RecordingExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        self.spans.lock().unwrap().extend(batch);
        Box::pin(std::future::ready(Ok(())))
    }
}

/// Tracer provider exporting synchronously into memory.
pub struct SpanRecorder {
    provider: TracerProvider,
    spans: Arc<Mutex<Vec<SpanData>>>,
}

impl SpanRecorder {
    pub fn new() -> Self {
        let exporter = RecordingExporter::default();
        let spans = Arc::clone(&exporter.spans);
        let provider = TracerProvider::builder()
            .with_simple_exporter(exporter)
            .build();
        Self { provider, spans }
    }

    pub fn tracer(&self) -> Tracer {
        self.provider.tracer("todo-frontend")
    }

    /// Finished spans, in end order.
    pub fn spans(&self) -> Vec<SpanData> {
        self.spans.lock().unwrap().clone()
    }

    pub fn span_names(&self) -> Vec<String> {
        self.spans()
            .iter()
            .map(|span| span.name.to_string())
            .collect()
    }
}

/// Attribute value on a finished span.
pub fn attr(span: &SpanData, key: &str) -> Option<Value> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| kv.value.clone())
}

/// Names of the events recorded on a finished span.
pub fn event_names(span: &SpanData) -> Vec<String> {
    span.events
        .iter()
        .map(|event| event.name.to_string())
        .collect()
}
