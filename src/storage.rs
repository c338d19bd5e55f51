use crate::{error::StorageError, kanban_board::BoardState, theme::Theme};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub const STORAGE_KEY: &str = "kanban_board_v1";
pub const THEME_KEY: &str = "kanban_theme";

/// String key-value substrate the board checkpoints into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Directory {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        debug!(key, bytes = value.len(), "store write");
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads the persisted board. Missing, unreadable or corrupt data yields an
/// empty board; this never fails.
pub fn load_state(store: &dyn KeyValueStore) -> BoardState {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BoardState::default(),
        Err(err) => {
            warn!(error = %err, "board store unreadable, starting empty");
            return BoardState::default();
        }
    };
    match serde_json::from_str::<BoardState>(&raw) {
        Ok(mut state) => {
            state.normalize();
            state
        }
        Err(err) => {
            warn!(error = %err, "stored board is corrupt, starting empty");
            BoardState::default()
        }
    }
}

pub fn save_state(store: &mut dyn KeyValueStore, state: &BoardState) -> Result<(), StorageError> {
    let data = serde_json::to_string(state)?;
    store.set(STORAGE_KEY, &data)
}

pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|err: String| {
            warn!(error = %err, "ignoring stored theme");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(err) => {
            warn!(error = %err, "theme store unreadable");
            Theme::default()
        }
    }
}

pub fn save_theme(store: &mut dyn KeyValueStore, theme: Theme) -> Result<(), StorageError> {
    store.set(THEME_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Column, Task};

    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Read {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            })
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    fn sample_task() -> Task {
        serde_json::from_value(serde_json::json!({
            "id": "k1", "title": "Persist me", "tags": ["a"], "col": "done", "createdAt": 5
        }))
        .unwrap()
    }

    #[test]
    fn missing_state_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_state(&store).tasks.is_empty());
    }

    #[test]
    fn corrupt_state_loads_empty() {
        let store = MemoryStore::new().with_entry(STORAGE_KEY, "{not json");
        assert!(load_state(&store).tasks.is_empty());

        let store = MemoryStore::new().with_entry(STORAGE_KEY, "null");
        assert!(load_state(&store).tasks.is_empty());
    }

    #[test]
    fn unreadable_store_falls_back_to_defaults() {
        assert!(load_state(&UnreadableStore).tasks.is_empty());
        assert_eq!(load_theme(&UnreadableStore), Theme::Dark);
        assert!(save_state(&mut UnreadableStore, &BoardState::default()).is_err());
    }

    #[test]
    fn blank_titled_tasks_are_dropped_on_load() {
        let store = MemoryStore::new().with_entry(
            STORAGE_KEY,
            r#"{"tasks": [{"id": "a", "title": "  "}, {"id": "b", "title": "kept"}]}"#,
        );
        let loaded = load_state(&store);
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].id, "b");
    }

    #[test]
    fn save_then_load_returns_same_tasks() {
        let mut store = MemoryStore::new();
        let state = BoardState {
            tasks: vec![sample_task()],
        };
        save_state(&mut store, &state).unwrap();

        let loaded = load_state(&store);
        assert_eq!(loaded, state);
        assert_eq!(loaded.tasks[0].col, Column::Done);
    }

    #[test]
    fn theme_defaults_to_dark() {
        let mut store = MemoryStore::new();
        assert_eq!(load_theme(&store), Theme::Dark);

        save_theme(&mut store, Theme::Light).unwrap();
        assert_eq!(load_theme(&store), Theme::Light);

        let store = MemoryStore::new().with_entry(THEME_KEY, "neon");
        assert_eq!(load_theme(&store), Theme::Dark);
    }

    #[test]
    fn file_store_round_trips_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("missing").unwrap(), None);
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert!(!store.dir().join("k.tmp").exists());
    }
}
