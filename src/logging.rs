use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "sentdrill.log";

/// Route `tracing` output to a file in `log_dir`; the terminal belongs to the UI.
///
/// The filter comes from `SENTDRILL_LOG` and defaults to `sentdrill=info`.
/// Lines are written on a background thread; keep the returned guard alive
/// until exit so buffered lines get flushed.
pub fn init(log_dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_env("SENTDRILL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("sentdrill=info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {e}"))?;

    Ok(guard)
}
