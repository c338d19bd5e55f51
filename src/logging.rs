//! File logging. The terminal belongs to the board, so tracing output goes to
//! `taskboard.log` in the data directory.

use crate::error::LoggingError;
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "taskboard.log";

static ACTIVE_LOG: OnceLock<PathBuf> = OnceLock::new();

/// Installs the global subscriber. Calling again with the same directory is a
/// no-op; a different directory is rejected.
pub fn init_logging(level: &str, dir: &Path) -> Result<PathBuf, LoggingError> {
    let path = dir.join(LOG_FILE);
    if let Some(active) = ACTIVE_LOG.get() {
        if *active == path {
            return Ok(path);
        }
        return Err(LoggingError::AlreadyInitialized(active.clone()));
    }

    let filter = EnvFilter::try_new(level).map_err(|_| LoggingError::Level(level.to_string()))?;
    let file_err = |source| LoggingError::File {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(file_err)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(file_err)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized(path.clone()))?;
    let _ = ACTIVE_LOG.set(path.clone());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        level,
        log = %path.display(),
        "logging started"
    );
    Ok(path)
}

pub fn active_log() -> Option<&'static Path> {
    ACTIVE_LOG.get().map(PathBuf::as_path)
}
