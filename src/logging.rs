use crate::config::{ensure_dirs, log_path};
use crate::error::AppError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Logs go to a file; the terminal belongs to the chart. `USAGE_CHART_LOG`
/// takes precedence over the configured level.
pub fn init(level: &str) -> Result<(), AppError> {
    ensure_dirs()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path()?)?;

    let filter = EnvFilter::try_from_env("USAGE_CHART_LOG")
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::Config(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::Config(format!("logging already initialized: {e}")))?;
    Ok(())
}
