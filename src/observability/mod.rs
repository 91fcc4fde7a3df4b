//! OpenTelemetry-based observability with OTLP/HTTP trace export.
//!
//! # Architecture
//!
//! ```text
//! TracedOperations ─┐
//!                   ├→ OpenTelemetry SDK → batch processor → OtlpHttpExporter → POST /v1/traces
//! tracing spans ────┘   (tracing-opentelemetry layer)
//! ```
//!
//! # Configuration
//!
//! - `OTEL_EXPORTER_URL`: trace endpoint (default `{origin}/v1/traces`)
//! - `TODO_TRACE_LEVEL`: `EnvFilter` directive for log output (default `warn`)
//!
//! # Modules
//!
//! - [`init`]: provider and subscriber setup, [`TelemetryHandle`]
//! - [`exporter`]: OTLP JSON over HTTP span exporter
//! - `span_formatter`: OTLP JSON span serialization

pub mod exporter;
pub mod init;
mod span_formatter;

pub use exporter::OtlpHttpExporter;
pub use init::{init_telemetry, TelemetryHandle, SERVICE_NAME};
