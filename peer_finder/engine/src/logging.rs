use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Initialize tracing on stdout.
/// Level defaults to `info` and can be overridden through `RUST_LOG`.
pub fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_current_span(false)
            .with_span_list(false)
            .with_level(true)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(false)
            .with_level(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(filter)
        .init();
}
