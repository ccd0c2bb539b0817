//! Logging setup for the browser host
//
// Call `logging::init(verbose)` at the start of main() and keep the returned
// guard alive for the program's duration.

use anyhow::{Context, Result};
use chrono::Local;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Initializes logging for the host.
///
/// - `verbose`: If true, also logs to stdout.
/// - Returns: LogGuard, which must be kept alive for file logging.
pub fn init(verbose: bool) -> Result<LogGuard> {
    let log_folder = log_folder()?;
    let log_path = log_folder.join("browser.log");

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open {} for writing", log_path.display()))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let env_filter = match std::env::var("RUST_LOG") {
        Ok(val) => EnvFilter::new(val),
        Err(_) => EnvFilter::new("info"),
    };

    // File log: plain formatting, no ANSI/color codes
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if verbose {
        let console_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_target(true);
        registry.with(console_layer).init();
    } else {
        registry.init();
    }

    tracing::debug!("Logging to {}", log_path.display());
    Ok(LogGuard(guard))
}

/// `<data dir>/logs/<timestamp>/`, created on demand.
fn log_folder() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "Pulsar", "Space_Browser")
        .context("Could not determine app data directory")?;
    let now = Local::now();
    let log_folder = proj_dirs
        .data_dir()
        .join("logs")
        .join(now.format("%Y-%m-%d_%H-%M-%S").to_string());
    fs::create_dir_all(&log_folder)
        .with_context(|| format!("Failed to create log folder {}", log_folder.display()))?;
    Ok(log_folder)
}
