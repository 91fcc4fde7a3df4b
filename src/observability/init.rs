//! Telemetry initialization and subscriber setup.
//!
//! Builds the tracer provider that feeds the OTLP/HTTP exporter, installs the
//! `tracing` subscriber, and returns a [`TelemetryHandle`] that owns the
//! provider for the lifetime of the application.

use super::exporter::OtlpHttpExporter;
use crate::domain::{Result, TodoError};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Tracer, TracerProvider};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `service.name` resource attribute and instrumentation scope name.
pub const SERVICE_NAME: &str = "todo-frontend";

/// Log level used when none is configured.
const DEFAULT_TRACE_LEVEL: &str = "warn";

/// Owner of the telemetry pipeline.
///
/// Created once at startup. [`TelemetryHandle::tracer`] is handed to the
/// traced operation wrapper; [`TelemetryHandle::shutdown`] flushes pending
/// spans before the process exits.
pub struct TelemetryHandle {
    provider: TracerProvider,
    tracer: Tracer,
}

impl TelemetryHandle {
    /// Tracer producing operation spans.
    #[must_use]
    pub fn tracer(&self) -> Tracer {
        self.tracer.clone()
    }

    /// Flushes buffered spans and stops the exporter.
    ///
    /// Blocks until the batch processor has drained; call it from a blocking
    /// context when running on the async runtime.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Telemetry`] if the provider fails to shut down.
    pub fn shutdown(self) -> Result<()> {
        tracing::debug!("shutting down telemetry");
        self.provider
            .shutdown()
            .map_err(|e| TodoError::Telemetry(e.to_string()))
    }
}

impl std::fmt::Debug for TelemetryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryHandle").finish_non_exhaustive()
    }
}

/// Initializes tracing with OTLP/HTTP export.
///
/// Sets up a pipeline that:
/// 1. Exports operation spans through a batch processor on the tokio runtime
/// 2. Bridges `tracing` spans into the same provider
/// 3. Prints log events at or above the configured level to stderr
///
/// Must be called from within a tokio runtime. Installing the subscriber is
/// idempotent: only the first call in a process takes effect.
///
/// # Errors
///
/// Returns [`TodoError::Config`] if the exporter URL is invalid.
///
/// # Example
///
/// ```no_run
/// use todo_tracer::observability::init_telemetry;
/// use todo_tracer::Config;
///
/// # async fn demo() -> todo_tracer::Result<()> {
/// let telemetry = init_telemetry(&Config::default())?;
/// let tracer = telemetry.tracer();
/// // ... run the application ...
/// tokio::task::spawn_blocking(move || telemetry.shutdown()).await.ok();
/// # Ok(())
/// # }
/// ```
pub fn init_telemetry(config: &Config) -> Result<TelemetryHandle> {
    let endpoint = config.exporter_url()?;

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let exporter = OtlpHttpExporter::new(
        reqwest::Client::new(),
        endpoint.clone(),
        resource.clone(),
        SERVICE_NAME,
    );

    let provider = TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .build();

    let tracer = provider.tracer(SERVICE_NAME);

    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| DEFAULT_TRACE_LEVEL.to_string());

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(OpenTelemetryLayer::new(tracer.clone()));

    if let Err(err) = subscriber.try_init() {
        tracing::debug!(error = %err, "tracing subscriber already installed, keeping it");
    }

    tracing::debug!(endpoint = %endpoint, "telemetry initialized");

    Ok(TelemetryHandle { provider, tracer })
}
