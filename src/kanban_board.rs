use crate::{
    storage::{self, KeyValueStore, MemoryStore},
    task::{generate_id, normalize_tags, parse_tags, Column, NewTask, Priority, Task, TaskId, TaskPatch},
    theme::Theme,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, error, info, warn};

/// Everything that is persisted and exported: `{ "tasks": [...] }`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub tasks: Vec<Task>,
}

impl BoardState {
    /// Cleans tags, drops untitled tasks and later tasks that reuse an
    /// earlier id.
    pub fn normalize(&mut self) {
        let mut seen = HashSet::new();
        self.tasks.retain(|task| {
            if task.title.trim().is_empty() {
                warn!(id = %task.id, "dropping task with blank title");
                return false;
            }
            let fresh = seen.insert(task.id.clone());
            if !fresh {
                warn!(id = %task.id, "dropping task with duplicate id");
            }
            fresh
        });
        for task in &mut self.tasks {
            task.tags = normalize_tags(&task.tags);
        }
    }
}

pub struct KanbanBoard {
    state: BoardState,
    store: Box<dyn KeyValueStore>,
    save_error: Option<String>,
}

impl KanbanBoard {
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let state = storage::load_state(store.as_ref());
        info!(tasks = state.tasks.len(), "board loaded");
        Self {
            state,
            store,
            save_error: None,
        }
    }

    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()))
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.state.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks_in(&self, col: Column) -> Vec<&Task> {
        self.state.tasks.iter().filter(|t| t.col == col).collect()
    }

    /// Sorted, de-duplicated union of every task's tags.
    pub fn all_tags(&self) -> Vec<String> {
        self.state
            .tasks
            .iter()
            .flat_map(|t| t.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn add_task(&mut self, new: NewTask) -> TaskId {
        let mut id = generate_id();
        while self.task(&id).is_some() {
            id = generate_id();
        }
        let task = Task {
            id: id.clone(),
            title: new.title.trim().to_string(),
            desc: new.desc,
            priority: new.priority,
            due: new.due,
            tags: parse_tags(&new.tags),
            col: new.col,
            created_at: Utc::now().timestamp_millis(),
        };
        debug!(id = %task.id, col = ?task.col, "task added");
        self.state.tasks.insert(0, task);
        self.persist();
        id
    }

    /// Returns `false` when no task has `id`; nothing is written in that case.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> bool {
        let Some(task) = self.state.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "update for unknown task ignored");
            return false;
        };
        task.apply(patch);
        debug!(id, col = ?task.col, "task updated");
        self.persist();
        true
    }

    pub fn move_task(&mut self, id: &str, col: Column) -> bool {
        self.update_task(id, TaskPatch::column(col))
    }

    pub fn remove_task(&mut self, id: &str) -> bool {
        let before = self.state.tasks.len();
        self.state.tasks.retain(|t| t.id != id);
        let removed = self.state.tasks.len() != before;
        debug!(id, removed, "task remove");
        self.persist();
        removed
    }

    /// Swaps the whole board, as an import does.
    pub fn replace_state(&mut self, mut state: BoardState) {
        state.normalize();
        info!(tasks = state.tasks.len(), "board replaced");
        self.state = state;
        self.persist();
    }

    /// Fills a brand-new board with a few example tasks. Returns whether it did.
    pub fn seed_if_empty(&mut self) -> bool {
        if !self.state.tasks.is_empty() {
            return false;
        }
        let seeds = [
            NewTask::new("Welcome to your Kanban!")
                .desc("Drag me across columns.")
                .tags("intro,docs"),
            NewTask::new("Build portfolio")
                .desc("Polish README + screenshots")
                .priority(Priority::High)
                .tags("portfolio")
                .col(Column::Progress),
            NewTask::new("Fix UI spacing")
                .priority(Priority::Low)
                .tags("ui,css")
                .col(Column::Review),
            NewTask::new("Deploy to GitHub Pages")
                .tags("deploy,github")
                .col(Column::Done),
        ];
        for seed in seeds {
            self.add_task(seed);
        }
        true
    }

    pub fn theme(&self) -> Theme {
        storage::load_theme(self.store.as_ref())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if let Err(err) = storage::save_theme(self.store.as_mut(), theme) {
            error!(error = %err, "failed to save theme");
            self.save_error = Some(err.to_string());
        }
    }

    /// Last checkpoint failure, cleared on read.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn persist(&mut self) {
        if let Err(err) = storage::save_state(self.store.as_mut(), &self.state) {
            error!(error = %err, "failed to save board");
            self.save_error = Some(err.to_string());
        }
    }
}
