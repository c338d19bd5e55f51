//! Filtered view of the board.
//!
//! The view is recomputed from scratch after every mutation or filter change;
//! nothing here is incremental.

use crate::task::{Column, Task, TaskId};

pub const EMPTY_COLUMN_HINT: &str = "Drop tasks here or create a new one.";
pub const ALL_TAGS_LABEL: &str = "All tags";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub query: String,
    pub tag: Option<String>,
}

impl Filter {
    /// Case-insensitive substring over title, description and tags, plus an
    /// exact match on the selected tag when one is set.
    pub fn matches(&self, task: &Task) -> bool {
        let query = self.query.to_lowercase();
        if !query.is_empty() && !task.haystack().contains(&query) {
            return false;
        }
        match &self.tag {
            Some(tag) => task.has_tag(tag),
            None => true,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.tag.is_some()
    }
}

/// Visible task ids per column, in board order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    columns: [Vec<TaskId>; 4],
}

impl BoardView {
    pub fn build(tasks: &[Task], filter: &Filter) -> Self {
        let mut view = Self::default();
        for task in tasks.iter().filter(|t| filter.matches(t)) {
            view.columns[task.col.index()].push(task.id.clone());
        }
        view
    }

    pub fn column(&self, col: Column) -> &[TaskId] {
        &self.columns[col.index()]
    }

    /// Whether `col` should show the placeholder instead of cards.
    pub fn is_empty(&self, col: Column) -> bool {
        self.columns[col.index()].is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

/// Options of the tag filter: "All tags" followed by the current tag universe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagOptions {
    tags: Vec<String>,
    selected: Option<String>,
}

impl TagOptions {
    /// Rebuilds the option list, keeping `current` selected only if it still exists.
    pub fn rebuild(all_tags: Vec<String>, current: Option<&str>) -> Self {
        let selected = current
            .filter(|cur| all_tags.iter().any(|t| t == cur))
            .map(str::to_string);
        Self {
            tags: all_tags,
            selected,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn label(&self) -> &str {
        self.selected().unwrap_or(ALL_TAGS_LABEL)
    }

    pub fn cycle_next(&mut self) {
        self.selected = match self.position() {
            None => self.tags.first().cloned(),
            Some(i) => self.tags.get(i + 1).cloned(),
        };
    }

    pub fn cycle_prev(&mut self) {
        self.selected = match self.position() {
            None => self.tags.last().cloned(),
            Some(0) => None,
            Some(i) => self.tags.get(i - 1).cloned(),
        };
    }

    fn position(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.tags.iter().position(|t| t == selected)
    }
}
