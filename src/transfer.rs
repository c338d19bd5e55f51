//! JSON export and import of the whole board.
//!
//! Export writes the full state pretty-printed to a file named after the
//! current date. Import replaces the state wholesale, but only once the file
//! has been read, parsed and shape-checked; any failure leaves the board
//! untouched.

use crate::{
    error::{ExportError, ImportError},
    kanban_board::{BoardState, KanbanBoard},
    task::Task,
};
use chrono::NaiveDate;
use serde_json::Value;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub fn export_file_name(date: NaiveDate) -> String {
    format!("kanban-export-{}.json", date.format("%Y-%m-%d"))
}

/// First free export path in `dir`: the plain dated name, then `-2`, `-3`, ...
pub fn next_export_path(dir: &Path, date: NaiveDate) -> PathBuf {
    let first = dir.join(export_file_name(date));
    if !first.exists() {
        return first;
    }
    (2..)
        .map(|n| dir.join(format!("kanban-export-{}-{n}.json", date.format("%Y-%m-%d"))))
        .find(|path| !path.exists())
        .unwrap_or(first)
}

pub fn export_json(state: &BoardState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

pub fn export_to_dir(
    dir: &Path,
    state: &BoardState,
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let path = next_export_path(dir, today);
    let json = export_json(state)?;
    fs::write(&path, json).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), tasks = state.tasks.len(), "board exported");
    Ok(path)
}

/// Parses an import file. The top level must be an object with a `tasks`
/// array; each entry must be a task and ids must be unique.
pub fn parse_import(text: &str) -> Result<BoardState, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ImportError::Parse(err.to_string()))?;
    let Some(entries) = value.get("tasks").and_then(Value::as_array) else {
        return Err(ImportError::InvalidFormat);
    };

    let mut tasks = Vec::with_capacity(entries.len());
    let mut ids = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let task: Task =
            serde_json::from_value(entry.clone()).map_err(|err| ImportError::InvalidTask {
                index,
                message: err.to_string(),
            })?;
        if task.title.trim().is_empty() {
            return Err(ImportError::InvalidTask {
                index,
                message: "title is empty".to_string(),
            });
        }
        if !ids.insert(task.id.clone()) {
            return Err(ImportError::DuplicateId(task.id));
        }
        tasks.push(task);
    }
    let mut state = BoardState { tasks };
    state.normalize();
    Ok(state)
}

pub fn import_from_path(path: &Path) -> Result<BoardState, ImportError> {
    let text = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_import(&text)
}

/// Reads `path` and swaps it into `board`. On error the board is unchanged.
pub fn import_into(board: &mut KanbanBoard, path: &Path) -> Result<usize, ImportError> {
    match import_from_path(path) {
        Ok(state) => {
            let count = state.tasks.len();
            board.replace_state(state);
            info!(path = %path.display(), tasks = count, "board imported");
            Ok(count)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "import rejected");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_file_name(date), "kanban-export-2026-03-07.json");
    }

    #[test]
    fn same_day_exports_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let first = export_to_dir(dir.path(), &BoardState::default(), date).unwrap();
        let second = export_to_dir(dir.path(), &BoardState::default(), date).unwrap();
        let third = export_to_dir(dir.path(), &BoardState::default(), date).unwrap();

        assert_eq!(first, dir.path().join("kanban-export-2026-03-07.json"));
        assert_eq!(second, dir.path().join("kanban-export-2026-03-07-2.json"));
        assert_eq!(third, dir.path().join("kanban-export-2026-03-07-3.json"));
        assert!(first.exists() && second.exists());
    }

    #[test]
    fn export_is_pretty_printed() {
        let json = export_json(&BoardState::default()).unwrap();
        assert_eq!(json, "{\n  \"tasks\": []\n}");
    }

    #[test]
    fn rejects_missing_tasks_array() {
        assert!(matches!(
            parse_import(r#"{"items": []}"#),
            Err(ImportError::InvalidFormat)
        ));
        assert!(matches!(
            parse_import(r#"{"tasks": {}}"#),
            Err(ImportError::InvalidFormat)
        ));
        assert!(matches!(parse_import("[]"), Err(ImportError::InvalidFormat)));
        assert!(matches!(parse_import("null"), Err(ImportError::InvalidFormat)));
        assert_eq!(
            ImportError::InvalidFormat.to_string(),
            "Invalid file format"
        );
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(parse_import("not json"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn rejects_bad_entries_and_duplicates() {
        let err = parse_import(r#"{"tasks": [{"id": "a", "title": "ok"}, {"title": "no id"}]}"#)
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidTask { index: 1, .. }));

        let err = parse_import(r#"{"tasks": [{"id": "a", "title": "x"}, {"id": "a", "title": "y"}]}"#)
            .unwrap_err();
        assert!(matches!(err, ImportError::DuplicateId(id) if id == "a"));

        let err = parse_import(r#"{"tasks": [{"id": "a", "title": "x", "col": "archive"}]}"#)
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidTask { index: 0, .. }));
    }

    #[test]
    fn accepts_empty_task_list() {
        assert_eq!(parse_import(r#"{"tasks": []}"#).unwrap(), BoardState::default());
    }
}
