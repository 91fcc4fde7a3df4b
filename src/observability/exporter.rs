//! OpenTelemetry span exporter posting OTLP JSON over HTTP.
//!
//! Spans are formatted by [`SpanFormatter`] and sent as one `POST` per batch to
//! the configured trace endpoint (by default `{origin}/v1/traces`).

use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use url::Url;

/// OTLP/HTTP JSON span exporter.
///
/// Export failures are returned to the span processor, which logs them; they
/// never reach the code that produced the spans.
pub struct OtlpHttpExporter {
    client: Client,
    endpoint: Url,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl OtlpHttpExporter {
    /// Creates an exporter posting to `endpoint`.
    ///
    /// # Parameters
    ///
    /// * `client` - HTTP client used for every export request
    /// * `endpoint` - Full trace endpoint URL, including `/v1/traces`
    /// * `resource` - Resource attributes attached to every batch
    /// * `scope_name` - Instrumentation scope name reported for the spans
    pub fn new(client: Client, endpoint: Url, resource: Resource, scope_name: &str) -> Self {
        Self {
            client,
            endpoint,
            formatter: SpanFormatter::new(resource, scope_name, env!("CARGO_PKG_VERSION")),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for OtlpHttpExporter {
    /// Posts a batch of spans as one OTLP JSON document.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        if batch.is_empty() {
            return Box::pin(std::future::ready(Ok(())));
        }

        let body = self.formatter.format_batch(&batch).to_string();
        let request = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let span_count = batch.len();

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| TraceError::from(format!("trace export failed: {e}")))?;

            let status = response.status();
            if status.is_success() {
                tracing::trace!(spans = span_count, "trace batch exported");
                Ok(())
            } else {
                Err(TraceError::from(format!(
                    "trace collector responded with HTTP {status}"
                )))
            }
        })
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for OtlpHttpExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtlpHttpExporter")
            .field("endpoint", &self.endpoint.as_str())
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}
