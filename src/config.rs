//! Runtime configuration.
//!
//! Read from `config.json` in the platform config directory
//! (`~/.config/taskboard/config.json` on Linux). Every key is optional and a
//! missing file means defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const APP_DIR: &str = "taskboard";
pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub seed_demo: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Holds the board, the theme preference and the log file.
    pub data_dir: PathBuf,
    /// Where exports are written.
    pub export_dir: PathBuf,
    pub log_level: String,
    /// Seed example tasks when the board starts empty.
    pub seed_demo: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE));
        let file = match path {
            Some(path) => read_config_file(&path)?,
            None => ConfigFile::default(),
        };
        Self::resolve(file, dirs::data_dir().map(|dir| dir.join(APP_DIR)))
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = read_config_file(path)?;
        Self::resolve(file, dirs::data_dir().map(|dir| dir.join(APP_DIR)))
    }

    /// Applies defaults to a parsed file. `default_data_dir` is used when the
    /// file names none.
    pub fn resolve(
        file: ConfigFile,
        default_data_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let data_dir = file
            .data_dir
            .or(default_data_dir)
            .ok_or(ConfigError::NoDataDir)?;
        let export_dir = file
            .export_dir
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            data_dir,
            export_dir,
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            seed_demo: file.seed_demo.unwrap_or(true),
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config = Config::resolve(ConfigFile::default(), Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/data"));
        assert_eq!(config.log_level, "info");
        assert!(config.seed_demo);
    }

    #[test]
    fn no_data_dir_is_an_error() {
        let err = Config::resolve(ConfigFile::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::NoDataDir));
    }

    #[test]
    fn file_values_win() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{"data_dir": "/tmp/board", "export_dir": "/tmp/out", "log_level": "debug", "seed_demo": false}"#,
        )
        .unwrap();

        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/board"));
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.log_level, "debug");
        assert!(!config.seed_demo);
    }

    #[test]
    fn missing_file_is_default_and_garbage_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            read_config_file(&dir.path().join("absent.json")).unwrap(),
            ConfigFile::default()
        );

        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{oops").unwrap();
        assert!(matches!(
            read_config_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
