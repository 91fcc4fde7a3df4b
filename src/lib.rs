//! Todo Tracer: a traced todo client for interchangeable Go and Java services.
//!
//! Todo Tracer lists, creates, and deletes todo items against one of two
//! backend services that expose the same REST contract under different path
//! prefixes. Every user-initiated call is wrapped in exactly one OpenTelemetry
//! span that records the backend, the action, the outcome, and any error.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front-end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Traced Layer  │   │ Gateway Layer │
//! │ (ui/)         │   │ (traced/)     │   │ (gateway/)    │
//! │ - Rendering   │   │ - One span    │   │ - HTTP client │
//! │ - Commands    │   │   per call    │   │ - Go / Java   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)                                   │
//! │  - Todo model, backend tag, operation kinds         │
//! │  - Error types                                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - Tracer provider and subscriber                   │
//! │  - OTLP/HTTP JSON export                            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (todos, backends, errors)
//! - [`gateway`]: Backend REST clients
//! - [`traced`]: Span-per-operation wrapper around the gateway
//! - [`ui`]: Plain-text rendering and command parsing
//! - [`observability`]: Tracer provider, subscriber, and OTLP export
//!
//! # Configuration
//!
//! Read from the environment by [`Config::from_env`]:
//!
//! | Variable            | Default                    |
//! |---------------------|----------------------------|
//! | `TODO_API_ORIGIN`   | `http://localhost:8080`    |
//! | `TODO_BACKEND`      | `go`                       |
//! | `OTEL_EXPORTER_URL` | `{TODO_API_ORIGIN}/v1/traces` |
//! | `TODO_TRACE_LEVEL`  | `warn`                     |
//!
//! # Initialization Flow
//!
//! 1. **Startup** (`main.rs`):
//!    - Read configuration from the environment
//!    - Initialize telemetry and obtain a tracer
//!    - Build `AppState` and `Dispatcher`
//!    - Dispatch `Event::Mounted`, which loads the selected backend's list
//!
//! 2. **Command loop**:
//!    - Parse a line into an `Event`
//!    - Handle it: mutate state, execute the resulting action
//!    - Render the view model
//!
//! 3. **Exit**:
//!    - Flush buffered spans through `TelemetryHandle::shutdown`
//!
//! # Example
//!
//! ```rust
//! use todo_tracer::{handle_event, Action, AppState, Backend, Event};
//!
//! let mut state = AppState::new(Backend::Go);
//! let (_, actions) = handle_event(&mut state, &Event::Mounted)?;
//! assert_eq!(actions, vec![Action::LoadTodos { backend: Backend::Go }]);
//! # Ok::<(), todo_tracer::TodoError>(())
//! ```

pub mod app;
pub mod domain;
pub mod gateway;
pub mod observability;
pub mod traced;
pub mod ui;

pub use app::{handle_event, Action, AppState, Dispatcher, Event};
pub use domain::{Backend, Result, TodoError, TodoId, TodoItem};

use std::collections::BTreeMap;

use opentelemetry_sdk::trace::Tracer;
use url::Url;

use crate::gateway::Gateways;
use crate::traced::TracedOperations;

const DEFAULT_API_ORIGIN: &str = "http://localhost:8080";
const TRACES_PATH: &str = "/v1/traces";

/// Application configuration.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use todo_tracer::{Backend, Config};
///
/// let mut map = BTreeMap::new();
/// map.insert("TODO_API_ORIGIN".to_string(), "http://todo.internal:9000/".to_string());
/// map.insert("TODO_BACKEND".to_string(), "java".to_string());
///
/// let config = Config::from_map(&map);
/// assert_eq!(config.backend, Backend::Java);
/// assert_eq!(
///     config.exporter_url().unwrap().as_str(),
///     "http://todo.internal:9000/v1/traces"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin serving both backends and, by default, the trace collector.
    pub api_origin: String,

    /// Backend selected at startup.
    pub backend: Backend,

    /// Explicit OTLP/HTTP traces endpoint.
    pub otel_exporter_url: Option<String>,

    /// `tracing` filter directive for stderr logs. Default: `"warn"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_origin: DEFAULT_API_ORIGIN.to_string(),
            backend: Backend::default(),
            otel_exporter_url: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a variable map.
    ///
    /// # Parsing Rules
    ///
    /// - `TODO_API_ORIGIN`: falls back to `http://localhost:8080` when blank
    /// - `TODO_BACKEND`: `go` or `java`, case-insensitive; anything else → `go`
    /// - `OTEL_EXPORTER_URL`: blank is treated as unset
    /// - `TODO_TRACE_LEVEL`: blank is treated as unset
    #[must_use]
    pub fn from_map(vars: &BTreeMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            vars.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(String::from)
        };

        let backend = non_blank("TODO_BACKEND").map_or_else(Backend::default, |value| {
            value.parse().unwrap_or_else(|e| {
                tracing::debug!(backend = %value, error = %e, "unknown backend, using default");
                Backend::default()
            })
        });

        Self {
            api_origin: non_blank("TODO_API_ORIGIN")
                .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string()),
            backend,
            otel_exporter_url: non_blank("OTEL_EXPORTER_URL"),
            trace_level: non_blank("TODO_TRACE_LEVEL"),
        }
    }

    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let vars = std::env::vars().collect::<BTreeMap<_, _>>();
        Self::from_map(&vars)
    }

    /// Parsed API origin.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Config`] if the origin is not a valid URL.
    pub fn api_origin_url(&self) -> Result<Url> {
        Url::parse(&self.api_origin)
            .map_err(|e| TodoError::Config(format!("invalid API origin '{}': {e}", self.api_origin)))
    }

    /// Traces endpoint: the explicit URL, or `/v1/traces` on the API origin.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Config`] if the resulting URL is invalid.
    pub fn exporter_url(&self) -> Result<Url> {
        let raw = self.otel_exporter_url.clone().unwrap_or_else(|| {
            format!("{}{TRACES_PATH}", self.api_origin.trim_end_matches('/'))
        });
        Url::parse(&raw)
            .map_err(|e| TodoError::Config(format!("invalid exporter URL '{raw}': {e}")))
    }
}

/// Builds the initial state and the dispatcher that executes its actions.
///
/// The returned state has the configured backend selected and an empty list;
/// dispatch [`Event::Mounted`] to load it.
///
/// # Errors
///
/// Returns [`TodoError::Config`] if the API origin is invalid or the HTTP
/// client cannot be built.
pub fn initialize(config: &Config, tracer: Tracer) -> Result<(AppState, Dispatcher)> {
    tracing::debug!(origin = %config.api_origin, backend = %config.backend, "initializing todo client");

    let origin = config.api_origin_url()?;
    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| TodoError::Config(format!("failed to build HTTP client: {e}")))?;
    let gateways = Gateways::http(&client, &origin)?;
    let dispatcher = Dispatcher::new(gateways, TracedOperations::new(tracer));

    Ok((AppState::new(config.backend), dispatcher))
}
