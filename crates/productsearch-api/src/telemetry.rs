//! Logging setup
//!
//! Logs always go to stderr through a non-blocking writer. When a log
//! directory is configured, the same events are also written to a daily
//! rotated file named after the service.

use anyhow::{Context, anyhow};
use productsearch_config::TelemetryConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};

/// Flush handles for the non-blocking writers
///
/// Buffered log lines are lost if this is dropped before shutdown, so hold it
/// for the lifetime of `main`.
#[must_use = "dropping the guards stops log output"]
pub struct LogGuards {
    _stderr: WorkerGuard,
    _file: Option<WorkerGuard>,
}

/// Build the event filter, preferring `RUST_LOG` over the configured level
///
/// # Errors
///
/// Returns an error if the configured level is not a valid filter directive
pub fn env_filter(config: &TelemetryConfig) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.tracing_level))
        .with_context(|| format!("Invalid tracing level '{}'", config.tracing_level))
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if the log directory cannot be created, the filter is
/// invalid, or a global subscriber is already installed
pub fn init_tracing(config: &TelemetryConfig) -> anyhow::Result<LogGuards> {
    let filter = env_filter(config)?;

    let (stderr_writer, stderr_guard): (NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(std::io::stderr());

    let (writer, file_guard) = match &config.log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("Failed to create log directory {log_dir}"))?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(&config.service_name)
                .filename_suffix("log")
                .build(log_dir)
                .with_context(|| format!("Failed to open log file in {log_dir}"))?;
            let (file_writer, file_guard): (NonBlocking, WorkerGuard) =
                tracing_appender::non_blocking(file_appender);

            (
                BoxMakeWriter::new(file_writer.and(stderr_writer)),
                Some(file_guard),
            )
        }
        None => (BoxMakeWriter::new(stderr_writer), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter);

    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(LogGuards {
        _stderr: stderr_guard,
        _file: file_guard,
    })
}
