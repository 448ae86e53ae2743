//! Logging system initialization
//!
//! Sets up tracing-based logging to `$GESTURELIGHT_HOME/gesturelight.log`,
//! mirrored to stderr, with the previous sessions' logs rotated on startup
//! (10 sessions kept).

use crate::config::ConfigManager;
use crate::error::{GestureLightError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Maximum number of historical log files to keep (gesturelight.log.1 through .9)
const MAX_LOG_FILES: u8 = 9;

/// Base name of the log file
const LOG_FILE_NAME: &str = "gesturelight.log";

/// Initialize the logging system
///
/// Log level defaults to INFO and can be overridden with `RUST_LOG`
/// (`RUST_LOG=gesturelight=debug` shows per-frame picks and strobe flips).
pub fn init_logging() -> Result<()> {
    let log_dir = ConfigManager::get_home_dir();
    std::fs::create_dir_all(&log_dir)?;

    rotate_logs_on_startup(&log_dir)?;

    // Rotation happens above, once per session, so the appender never rotates
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("gesturelight")
        .filename_suffix("log")
        .build(&log_dir)
        .map_err(|e| GestureLightError::ConfigError(Box::new(e)))?;

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| GestureLightError::ConfigError(Box::new(e)))?;

    tracing::info!("gesturelight v{} started", env!("CARGO_PKG_VERSION"));

    Ok(())
}

/// Path of one log generation: 0 is the live log, 1 the previous session
fn log_generation_path(log_dir: &Path, generation: u8) -> PathBuf {
    match generation {
        0 => log_dir.join(LOG_FILE_NAME),
        n => log_dir.join(format!("{LOG_FILE_NAME}.{n}")),
    }
}

/// Shift every log in `log_dir` one generation back, dropping the oldest
///
/// Does nothing when there is no live log. The logger then creates a fresh
/// one.
fn rotate_logs_on_startup(log_dir: &Path) -> Result<()> {
    if !log_generation_path(log_dir, 0).exists() {
        return Ok(());
    }

    let oldest = log_generation_path(log_dir, MAX_LOG_FILES);
    if oldest.exists() {
        std::fs::remove_file(&oldest)?;
    }

    for generation in (0..MAX_LOG_FILES).rev() {
        let from = log_generation_path(log_dir, generation);
        if from.exists() {
            std::fs::rename(&from, log_generation_path(log_dir, generation + 1))?;
        }
    }

    Ok(())
}
