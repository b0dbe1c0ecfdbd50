//! Logging Infrastructure
//!
//! `tracing-subscriber` fmt output to stdout, or to a daily rolling file when
//! a log directory is configured. `RUST_LOG` wins over the configured level.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the logger (stdout, `info`)
pub fn init_logger() -> Option<WorkerGuard> {
    init_logger_with_file(None, None)
}

/// Initialize the logger with optional file output
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) -> Option<WorkerGuard> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, "food-server");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            // A second init (tests) is not an error worth failing over
            let _ = subscriber.with_writer(writer).with_ansi(false).try_init();
            return Some(guard);
        }
    }

    let _ = subscriber.try_init();
    None
}
