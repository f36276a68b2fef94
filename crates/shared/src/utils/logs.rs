use anyhow::Result;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Clone, Copy)]
pub struct LogOptions<'a> {
    pub component: &'a str,
    pub is_dev: bool,
    pub enable_file: bool,
}

/// Installs the global subscriber: pretty console output filtered by `RUST_LOG`,
/// an optional JSON file that rolls daily, and the OpenTelemetry log bridge when a
/// logger provider is given.
///
/// The returned guard must stay alive for the file writer to flush.
pub fn init_logger(
    options: LogOptions<'_>,
    logger_provider: Option<&SdkLoggerProvider>,
) -> Result<Option<WorkerGuard>> {
    let log_dir = if options.is_dev { "./logs" } else { "/var/log/app" };

    let (file_layer, guard) = if options.enable_file {
        let file_name = format!("rust_app_{}.log", options.component);
        let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
        let (file_writer, guard) = non_blocking(file_appender);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let default_level = if options.is_dev { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .pretty()
        .with_thread_names(true)
        .with_ansi(options.is_dev)
        .with_filter(console_filter);

    let otel_layer = match logger_provider {
        Some(provider) => {
            let otel_filter = EnvFilter::new("info")
                .add_directive("hyper=off".parse()?)
                .add_directive("opentelemetry=off".parse()?)
                .add_directive("tonic=off".parse()?)
                .add_directive("h2=off".parse()?)
                .add_directive("reqwest=off".parse()?);

            Some(OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(guard)
}
