use crate::error::LoggerError;
use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::{
    Resource,
    trace::{SdkTracerProvider, TraceError},
};
use tokio::runtime::{Builder, Handle, Runtime};

/// Shuts the global tracer provider down when dropped, flushing pending spans.
///
/// Owns the exporter runtime when [`init_otlp_tracer`] had to start one; it is
/// dropped after the provider has shut down.
#[derive(Debug)]
pub struct OpenTelemetryGuard {
    provider: SdkTracerProvider,
    runtime: Option<Runtime>,
}

impl OpenTelemetryGuard {
    /// Whether the exporter runs on a runtime owned by this guard.
    #[must_use]
    pub const fn owns_runtime(&self) -> bool {
        self.runtime.is_some()
    }
}

impl Drop for OpenTelemetryGuard {
    fn drop(&mut self) {
        let _ = self.provider.shutdown();
    }
}

/// Installs an OTLP tracer provider as the global provider, ready for the
/// remote sink enabled by `logging.enable_remote`.
///
/// The gRPC exporter needs a Tokio reactor. Inside a runtime the current one is
/// used; from synchronous code a single-worker runtime is started and kept in
/// the returned guard.
///
/// Honors the standard `OTEL_EXPORTER_OTLP_ENDPOINT` and `OTEL_RESOURCE_ATTRIBUTES`
/// variables. `client_id` is attached as the `dashboard.client` resource attribute.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] if `service_name` is empty.
/// Returns [`LoggerError::Internal`] if the exporter runtime cannot be started.
/// Returns [`LoggerError::OpenTelemetry`] if the exporter cannot be built.
///
/// # Examples
/// ```rust,no_run
/// use novis_logger::init_otlp_tracer;
///
/// let _otel = init_otlp_tracer("novis", "client_abc123")?;
/// # Ok::<(), novis_logger::LoggerError>(())
/// ```
pub fn init_otlp_tracer(
    service_name: impl Into<String>,
    client_id: impl Into<String>,
) -> Result<OpenTelemetryGuard, LoggerError> {
    let service_name = service_name.into();
    if service_name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "service_name cannot be empty".into(),
            context: None,
        });
    }

    let runtime = match Handle::try_current() {
        Ok(_) => None,
        Err(_) => Some(exporter_runtime()?),
    };
    let _entered = runtime.as_ref().map(Runtime::enter);

    let resource = Resource::builder_empty()
        .with_attributes([
            KeyValue::new("service.name", service_name),
            KeyValue::new("dashboard.client", client_id.into()),
        ])
        .build();

    let exporter =
        opentelemetry_otlp::SpanExporter::builder().with_tonic().build().map_err(|source| {
            LoggerError::OpenTelemetry {
                source: TraceError::Other(Box::new(source)),
                context: Some("Failed to build OTLP span exporter".into()),
            }
        })?;

    let provider =
        SdkTracerProvider::builder().with_batch_exporter(exporter).with_resource(resource).build();

    global::set_tracer_provider(provider.clone());

    Ok(OpenTelemetryGuard { provider, runtime })
}

fn exporter_runtime() -> Result<Runtime, LoggerError> {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("novis-otlp")
        .enable_all()
        .build()
        .map_err(|e| LoggerError::Internal {
            message: e.to_string().into(),
            context: Some("Failed to start the OTLP exporter runtime".into()),
        })
}
