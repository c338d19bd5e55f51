use crate::task::{parse_due, Column, NewTask, Priority, Task, TaskId, TaskPatch, DUE_FORMAT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    New,
    Edit(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Desc,
    Priority,
    Due,
    Tags,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Desc,
        Field::Priority,
        Field::Due,
        Field::Tags,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Desc => "Description",
            Field::Priority => "Priority",
            Field::Due => "Due (YYYY-MM-DD)",
            Field::Tags => "Tags (comma separated)",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// What the board should do once the dialog closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    Create(NewTask),
    Update(TaskId, TaskPatch),
    Delete(TaskId),
}

/// The new/edit task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDialog {
    pub mode: DialogMode,
    pub title: String,
    pub desc: String,
    pub priority: Priority,
    pub due: String,
    pub tags: String,
    pub col: Column,
    pub focus: Field,
    pub error: Option<String>,
}

impl TaskDialog {
    pub fn open_new(col: Column) -> Self {
        Self {
            mode: DialogMode::New,
            title: String::new(),
            desc: String::new(),
            priority: Priority::default(),
            due: String::new(),
            tags: String::new(),
            col,
            focus: Field::Title,
            error: None,
        }
    }

    pub fn open_edit(task: &Task) -> Self {
        Self {
            mode: DialogMode::Edit(task.id.clone()),
            title: task.title.clone(),
            desc: task.desc.clone(),
            priority: task.priority,
            due: task
                .due
                .map(|d| d.format(DUE_FORMAT).to_string())
                .unwrap_or_default(),
            tags: task.tags.join(", "),
            col: task.col,
            focus: Field::Title,
            error: None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            DialogMode::New => "New Task",
            DialogMode::Edit(_) => "Edit Task",
        }
    }

    pub fn can_delete(&self) -> bool {
        matches!(self.mode, DialogMode::Edit(_))
    }

    pub fn focus_next(&mut self) {
        let i = (self.focus.position() + 1) % Field::ALL.len();
        self.focus = Field::ALL[i];
    }

    pub fn focus_prev(&mut self) {
        let i = (self.focus.position() + Field::ALL.len() - 1) % Field::ALL.len();
        self.focus = Field::ALL[i];
    }

    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Title => self.title.clone(),
            Field::Desc => self.desc.clone(),
            Field::Priority => self.priority.label().to_string(),
            Field::Due => self.due.clone(),
            Field::Tags => self.tags.clone(),
        }
    }

    pub fn input(&mut self, c: char) {
        self.error = None;
        match self.focus {
            Field::Priority => {
                if c == ' ' {
                    self.priority = self.priority.cycle();
                }
            }
            _ => {
                if let Some(text) = self.text_mut() {
                    text.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        if let Some(text) = self.text_mut() {
            text.pop();
        }
    }

    pub fn cycle_priority(&mut self) {
        self.priority = self.priority.cycle();
    }

    /// Validates the form. Returns `None` and keeps the dialog open when the
    /// title is blank or the due date does not parse.
    pub fn submit(&mut self) -> Option<DialogAction> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            self.error = Some("Title is required".to_string());
            self.focus = Field::Title;
            return None;
        }
        let due = match self.due.trim() {
            "" => None,
            raw => match parse_due(raw) {
                Ok(date) => Some(date),
                Err(_) => {
                    self.error = Some("Due date must look like 2025-01-31".to_string());
                    self.focus = Field::Due;
                    return None;
                }
            },
        };
        let desc = self.desc.trim().to_string();

        let action = match &self.mode {
            DialogMode::New => DialogAction::Create(NewTask {
                title,
                desc,
                priority: self.priority,
                due,
                tags: self.tags.clone(),
                col: self.col,
            }),
            DialogMode::Edit(id) => DialogAction::Update(
                id.clone(),
                TaskPatch {
                    title: Some(title),
                    desc: Some(desc),
                    priority: Some(self.priority),
                    due: Some(due),
                    tags: Some(self.tags.clone()),
                    col: Some(self.col),
                },
            ),
        };
        Some(action)
    }

    pub fn delete(&self) -> Option<DialogAction> {
        match &self.mode {
            DialogMode::Edit(id) => Some(DialogAction::Delete(id.clone())),
            DialogMode::New => None,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Desc => Some(&mut self.desc),
            Field::Due => Some(&mut self.due),
            Field::Tags => Some(&mut self.tags),
            Field::Priority => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn type_str(dialog: &mut TaskDialog, s: &str) {
        s.chars().for_each(|c| dialog.input(c));
    }

    #[test]
    fn new_dialog_is_cleared_and_preset_to_column() {
        let dialog = TaskDialog::open_new(Column::Review);
        assert_eq!(dialog.heading(), "New Task");
        assert!(!dialog.can_delete());
        assert!(dialog.title.is_empty());
        assert_eq!(dialog.col, Column::Review);
        assert_eq!(dialog.delete(), None);
    }

    #[test]
    fn blank_title_keeps_dialog_open() {
        let mut dialog = TaskDialog::open_new(Column::Backlog);
        type_str(&mut dialog, "   ");
        assert_eq!(dialog.submit(), None);
        assert!(dialog.error.is_some());
    }

    #[test]
    fn submit_new_builds_create_action() {
        let mut dialog = TaskDialog::open_new(Column::Progress);
        type_str(&mut dialog, " Plan ");
        dialog.focus = Field::Priority;
        dialog.input(' ');
        dialog.focus = Field::Due;
        type_str(&mut dialog, "2025-02-01");
        dialog.focus = Field::Tags;
        type_str(&mut dialog, "a, b");

        let Some(DialogAction::Create(new)) = dialog.submit() else {
            panic!("expected create");
        };
        assert_eq!(new.title, "Plan");
        assert_eq!(new.priority, Priority::High);
        assert_eq!(new.due, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(new.tags, "a, b");
        assert_eq!(new.col, Column::Progress);
    }

    #[test]
    fn bad_due_date_is_rejected() {
        let mut dialog = TaskDialog::open_new(Column::Backlog);
        type_str(&mut dialog, "x");
        dialog.focus = Field::Due;
        type_str(&mut dialog, "tomorrow");
        assert_eq!(dialog.submit(), None);
        assert_eq!(dialog.focus, Field::Due);
    }

    #[test]
    fn edit_dialog_round_trips_fields() {
        let task = Task {
            id: "t1".into(),
            title: "Edit me".into(),
            desc: "body".into(),
            priority: Priority::Low,
            due: NaiveDate::from_ymd_opt(2024, 12, 24),
            tags: vec!["x".into(), "y".into()],
            col: Column::Done,
            created_at: 1,
        };
        let mut dialog = TaskDialog::open_edit(&task);
        assert_eq!(dialog.heading(), "Edit Task");
        assert_eq!(dialog.tags, "x, y");
        assert_eq!(dialog.due, "2024-12-24");
        assert_eq!(dialog.delete(), Some(DialogAction::Delete("t1".into())));

        let Some(DialogAction::Update(id, patch)) = dialog.submit() else {
            panic!("expected update");
        };
        assert_eq!(id, "t1");
        let mut updated = task.clone();
        updated.apply(patch);
        assert_eq!(updated, task);
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut dialog = TaskDialog::open_new(Column::Backlog);
        dialog.focus_prev();
        assert_eq!(dialog.focus, Field::Tags);
        dialog.focus_next();
        assert_eq!(dialog.focus, Field::Title);
    }
}
