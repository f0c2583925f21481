//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::infrastructure::paths::resolve_data_path;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on exported spans.
const SERVICE_NAME: &str = "inbox-sync";

/// Installs the global tracing subscriber.
///
/// The pipeline is:
/// 1. `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `"info"`
/// 2. `fmt` layer writing human-readable logs to stderr
/// 3. When `config.trace_file` is set, an OpenTelemetry layer exporting spans
///    to that file (relative paths land in the data directory)
///
/// Safe to call more than once; only the first call takes effect. If the
/// trace directory cannot be created the file export is skipped and logging
/// still goes to stderr.
///
/// # Example
///
/// ```rust
/// use inbox_sync::observability::init_tracing;
/// use inbox_sync::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let otel_layer = config.trace_file.as_deref().and_then(|path| {
        let trace_file = resolve_data_path(path);
        if let Some(parent) = trace_file.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }

        let resource = Resource::new(vec![opentelemetry::KeyValue::new(
            "service.name",
            SERVICE_NAME,
        )]);
        let provider = tracer::create_tracer_provider(trace_file, resource);
        Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(otel_layer)
        .try_init();
}
