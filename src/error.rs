use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures of the key-value store backing the board.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access store directory {}: {source}", .path.display())]
    Directory { path: PathBuf, source: io::Error },

    #[error("failed to read key `{key}`: {source}")]
    Read { key: String, source: io::Error },

    #[error("failed to write key `{key}`: {source}")]
    Write { key: String, source: io::Error },

    #[error("failed to serialize board: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reasons an import file is rejected. The board is left untouched in every case.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{0}")]
    Parse(String),

    #[error("Invalid file format")]
    InvalidFormat,

    #[error("task #{index} is malformed: {message}")]
    InvalidTask { index: usize, message: String },

    #[error("duplicate task id `{0}`")]
    DuplicateId(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("no platform data directory available; set `data_dir` in config.json")]
    NoDataDir,
}

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", .path.display())]
    File { path: PathBuf, source: io::Error },

    #[error("invalid log level `{0}`")]
    Level(String),

    #[error("logging already initialized at {}", .0.display())]
    AlreadyInitialized(PathBuf),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to write export {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to serialize board: {0}")]
    Serialize(#[from] serde_json::Error),
}
