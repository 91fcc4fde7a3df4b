//! HTTP implementation of the todo gateway.
//!
//! One [`HttpGateway`] talks to one backend: it owns the resolved
//! `{origin}{prefix}/todos` collection URL and a shared `reqwest` client.
//! Every request carries the current OpenTelemetry context as W3C trace
//! context headers, so backend spans join the client's trace.

use async_trait::async_trait;
use opentelemetry::propagation::{Injector, TextMapPropagator};
use opentelemetry::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use url::Url;

use super::backend::TodoGateway;
use super::models::{self, NewTodo};
use crate::domain::{Backend, OperationKind, Result, TodoError, TodoId, TodoItem};

/// Gateway for a todo service reachable over HTTP.
///
/// Requests use the client's default timeouts and are never retried.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    backend: Backend,
    todos_url: Url,
}

impl HttpGateway {
    /// Creates a gateway for `backend` mounted under `origin`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Config`] if `origin` is not an http(s) URL.
    pub fn new(client: Client, origin: &Url, backend: Backend) -> Result<Self> {
        if !matches!(origin.scheme(), "http" | "https") {
            return Err(TodoError::Config(format!(
                "backend origin must be http or https, got '{origin}'"
            )));
        }

        let base = origin.as_str().trim_end_matches('/');
        let todos_url = Url::parse(&format!("{base}{}/todos", backend.path_prefix()))
            .map_err(|e| TodoError::Config(format!("invalid backend origin '{origin}': {e}")))?;

        tracing::debug!(backend = %backend, url = %todos_url, "gateway configured");

        Ok(Self {
            client,
            backend,
            todos_url,
        })
    }

    /// Collection URL this gateway lists and creates against.
    #[must_use]
    pub const fn todos_url(&self) -> &Url {
        &self.todos_url
    }

    fn item_url(&self, id: &TodoId) -> Result<Url> {
        let mut url = self.todos_url.clone();
        url.path_segments_mut()
            .map_err(|()| TodoError::Config(format!("'{}' cannot carry a todo id", self.todos_url)))?
            .push(id.as_str());
        Ok(url)
    }

    fn transport(&self, operation: OperationKind, reason: impl Into<String>) -> TodoError {
        TodoError::Transport {
            backend: self.backend,
            operation,
            reason: reason.into(),
        }
    }

    /// Rejects non-success responses, keeping the status in the reason.
    fn check_status(&self, operation: OperationKind, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::debug!(backend = %self.backend, %operation, status = status.as_u16(), "backend rejected request");
            Err(self.transport(operation, format!("HTTP {status}")))
        }
    }

    async fn read_body(&self, operation: OperationKind, response: Response) -> Result<Vec<u8>> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| self.transport(operation, e.to_string()))
    }
}

/// Writes propagator fields into request headers, skipping invalid ones.
struct HeaderInjector<'a>(&'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                self.0.insert(name, value);
            }
            _ => tracing::debug!(key, "dropping unrepresentable trace header"),
        }
    }
}

/// `traceparent` (and `tracestate`) for the current context.
///
/// Empty when no span is active.
fn trace_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    TraceContextPropagator::new()
        .inject_context(&Context::current(), &mut HeaderInjector(&mut headers));
    headers
}

#[async_trait]
impl TodoGateway for HttpGateway {
    fn backend(&self) -> Backend {
        self.backend
    }

    async fn list(&self) -> Result<Vec<TodoItem>> {
        let operation = OperationKind::LoadTodos;
        let response = self
            .client
            .get(self.todos_url.clone())
            .headers(trace_headers())
            .send()
            .await
            .map_err(|e| self.transport(operation, e.to_string()))?;

        let response = self.check_status(operation, response)?;
        let body = self.read_body(operation, response).await?;
        models::decode_list(self.backend, &body)
    }

    async fn create(&self, name: &str) -> Result<TodoItem> {
        let operation = OperationKind::CreateTodo;
        let response = self
            .client
            .post(self.todos_url.clone())
            .headers(trace_headers())
            .json(&NewTodo { name })
            .send()
            .await
            .map_err(|e| self.transport(operation, e.to_string()))?;

        let response = self.check_status(operation, response)?;
        let body = self.read_body(operation, response).await?;
        models::decode_created(self.backend, &body)
    }

    async fn delete(&self, id: &TodoId) -> Result<()> {
        let operation = OperationKind::DeleteTodo;
        let url = self.item_url(id)?;
        let response = self
            .client
            .delete(url)
            .headers(trace_headers())
            .send()
            .await
            .map_err(|e| self.transport(operation, e.to_string()))?;

        self.check_status(operation, response)?;
        Ok(())
    }
}
