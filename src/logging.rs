//! Log routing for the server: compact stdout output plus an appended log file.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const FALLBACK_LOG_PATH: &str = "logs/students.log";

/// Install the global subscriber. `RUST_LOG` controls filtering and defaults to `info`.
///
/// When the log file cannot be opened the server keeps running with stdout only.
pub fn init_tracing(log_file: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = open_log_file(&log_path(log_file)).map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .with(file_layer)
        .init();
}

fn log_path(log_file: Option<&str>) -> PathBuf {
    PathBuf::from(log_file.unwrap_or(FALLBACK_LOG_PATH))
}

fn open_log_file(path: &Path) -> Option<NonBlocking> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            eprintln!("Cannot create log directory {}: {err}", parent.display());
            return None;
        }
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| eprintln!("Cannot open log file {}: {err}", path.display()))
        .ok()?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let _ = FILE_GUARD.set(guard);
    Some(writer)
}
