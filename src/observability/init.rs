//! Subscriber installation.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the plugin's span file inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "zcatalog-otlp.json";

/// Name of the worker's span file, next to the plugin's.
///
/// The worker runs in its own WASM instance with its own writer, so the two
/// must never rotate the same file.
pub const WORKER_TRACE_FILE_NAME: &str = "zcatalog-worker-otlp.json";

const SERVICE_NAME: &str = "zcatalog";

const DEFAULT_LEVEL: &str = "info";

/// Which side of the plugin is installing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceTarget {
    Plugin,
    Worker,
}

impl TraceTarget {
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Plugin => TRACE_FILE_NAME,
            Self::Worker => WORKER_TRACE_FILE_NAME,
        }
    }
}

/// Installs the plugin's global tracing subscriber.
///
/// The filter comes from `config.trace_level` (any `EnvFilter` directive, for
/// example `debug` or `zcatalog::search=trace`) and defaults to `info`. Every
/// failure here is swallowed: a plugin that cannot write traces still has to
/// run.
pub fn init_tracing(config: &Config) {
    install(config, TraceTarget::Plugin);
}

/// Installs the worker's subscriber, writing to [`WORKER_TRACE_FILE_NAME`].
pub fn init_worker_tracing(config: &Config) {
    install(config, TraceTarget::Worker);
}

fn install(config: &Config, target: TraceTarget) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = crate::infrastructure::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(data_dir.join(target.file_name()), SERVICE_NAME, resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_and_worker_write_separate_files() {
        assert_eq!(TraceTarget::Plugin.file_name(), "zcatalog-otlp.json");
        assert_eq!(TraceTarget::Worker.file_name(), "zcatalog-worker-otlp.json");
        assert_ne!(TraceTarget::Plugin.file_name(), TraceTarget::Worker.file_name());
    }
}
