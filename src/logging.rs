//! Tracing setup for the demo host.
//!
//! The widget draws on the terminal, so events never go to stdout or stderr.
//! When a log directory is configured they are appended to
//! `<log_dir>/masked-demo.log`, filtered by `RUST_LOG` (default `debug`).

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "masked-demo.log";

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered events are flushed.
pub fn init(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let log_dir = log_dir?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init();

    initialized.ok().map(|()| guard)
}
