//! Tracing setup for the server process.
//!
//! Logs always go to stdout in a compact format. When a log file is configured
//! (`FLASHCARDS_LOG_FILE` or `--log-file`), the same events are appended to it through a
//! non-blocking writer, without ANSI colors and with targets included.
use std::path::Path;
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset; request spans from `tower_http` stay at `info`.
const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Install the global subscriber, optionally mirroring output into `log_file`.
pub fn init_tracing(log_file: Option<&Path>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = log_file.and_then(file_writer).map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).compact())
        .with(file_layer)
        .init();
}

/// Open `path` for appending, creating parent directories as needed.
///
/// Returns `None` (after reporting on stderr) when the file cannot be prepared; the server then
/// logs to stdout only.
fn file_writer(path: &Path) -> Option<NonBlocking> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            eprintln!("Failed to create log directory {}: {err}", parent.display());
            return None;
        }
    }
    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let _ = LOG_GUARD.set(guard);
            Some(writer)
        }
        Err(err) => {
            eprintln!("Failed to open log file {}: {err}", path.display());
            None
        }
    }
}
