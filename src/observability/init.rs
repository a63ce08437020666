//! Tracing initialization and subscriber setup.

use super::exporter::{create_tracer_provider, SCOPE_NAME};
use crate::infrastructure::paths::{get_data_dir, trace_file_path};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when no level is configured or the directive is invalid.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Builds the span filter from a configured `EnvFilter` directive.
///
/// Invalid directives fall back to [`DEFAULT_TRACE_LEVEL`].
#[must_use]
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    let directive = level.map_or(DEFAULT_TRACE_LEVEL, str::trim);
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL))
}

/// Installs the global subscriber exporting spans to the trace file.
///
/// Best-effort: returns silently if the data directory cannot be created or a
/// subscriber is already installed, so repeated calls are harmless.
pub fn init_tracing(level: Option<&str>) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SCOPE_NAME)]);
    let provider = create_tracer_provider(trace_file_path(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(otel_layer)
        .try_init();
}
