//! File-based logging for artist-explorer
//!
//! This module sets up tracing-based logging that writes to a file instead of stdout,
//! since the application uses a TUI that occupies the terminal.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_PREFIX: &str = "artist-explorer";
const DEFAULT_FILTER: &str = "artist_explorer=debug,reqwest=info,rodio=warn,warn";

/// Initialize the logging system.
///
/// Logs are written to `<log_dir>/artist-explorer.YYYY-MM-DD.log` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `artist_explorer` modules: DEBUG
/// - `reqwest`: INFO
/// - `rodio`: WARN
/// - Other crates: WARN
pub fn init_logging(log_dir: &Path) -> anyhow::Result<()> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    // Non-blocking so the async runtime never waits on disk
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; it has to outlive the application
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Logging initialized - logs written to {}/", log_dir.display());

    Ok(())
}

/// Log the outcome of a backend request
#[macro_export]
macro_rules! log_fetch_result {
    ($endpoint:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::info!(endpoint = $endpoint, "Backend request successful"),
            Err(e) => tracing::error!(endpoint = $endpoint, error = %e, "Backend request failed"),
        }
    };
}

/// Log a backend request with additional context
#[macro_export]
macro_rules! log_fetch_request {
    ($endpoint:expr, $($field:tt)*) => {
        tracing::debug!(endpoint = $endpoint, $($field)*, "Backend request started");
    };
}
