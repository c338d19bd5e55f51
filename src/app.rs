use crate::{
    dialog::{DialogAction, Field, TaskDialog},
    drag::DragState,
    filter::{BoardView, Filter, TagOptions},
    kanban_board::KanbanBoard,
    task::{Column, TaskId},
    theme::Theme,
    transfer,
};
use chrono::{NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    ImportPath(String),
}

/// Application root: owns the board and everything the view is drawn from.
pub struct App {
    pub board: KanbanBoard,
    pub filter: Filter,
    pub tag_options: TagOptions,
    pub view: BoardView,
    pub selected_column: Column,
    pub selected_task: usize,
    pub dialog: Option<TaskDialog>,
    pub drag: DragState,
    pub mode: InputMode,
    /// Blocking message; the next key only dismisses it.
    pub alert: Option<String>,
    pub status: Option<String>,
    pub theme: Theme,
    pub export_dir: PathBuf,
    pub should_quit: bool,
}

impl App {
    pub fn new(board: KanbanBoard, export_dir: PathBuf) -> Self {
        let theme = board.theme();
        let mut app = Self {
            board,
            filter: Filter::default(),
            tag_options: TagOptions::default(),
            view: BoardView::default(),
            selected_column: Column::Backlog,
            selected_task: 0,
            dialog: None,
            drag: DragState::default(),
            mode: InputMode::Normal,
            alert: None,
            status: None,
            theme,
            export_dir,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Recomputes the tag options and the filtered view. Runs after every
    /// mutation and every filter change.
    pub fn refresh(&mut self) {
        self.tag_options = TagOptions::rebuild(self.board.all_tags(), self.filter.tag.as_deref());
        self.filter.tag = self.tag_options.selected().map(str::to_string);
        self.view = BoardView::build(self.board.tasks(), &self.filter);

        let len = self.view.column(self.selected_column).len();
        self.selected_task = self.selected_task.min(len.saturating_sub(1));

        if let Some(id) = self.drag.dragging() {
            if self.board.task(id).is_none() {
                self.drag.cancel();
            }
        }
        if let Some(err) = self.board.take_save_error() {
            self.status = Some(format!("Save failed: {err}"));
        }
    }

    pub fn selected_task_id(&self) -> Option<&TaskId> {
        self.view
            .column(self.selected_column)
            .get(self.selected_task)
    }

    pub fn select_task(&mut self, id: &str) {
        for col in Column::ALL {
            if let Some(row) = self.view.column(col).iter().position(|t| t == id) {
                self.selected_column = col;
                self.selected_task = row;
                return;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.alert.take().is_some() {
            return;
        }
        if self.dialog.is_some() {
            self.handle_dialog_key(key);
            return;
        }
        match self.mode.clone() {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => self.handle_search_key(key),
            InputMode::ImportPath(path) => self.handle_import_key(key, path),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.focus_column(self.selected_column.prev()),
            KeyCode::Right | KeyCode::Char('l') => self.focus_column(self.selected_column.next()),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_task = self.selected_task.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.view.column(self.selected_column).len();
                if self.selected_task + 1 < len {
                    self.selected_task += 1;
                }
            }
            KeyCode::Char('n') => self.open_new(),
            KeyCode::Enter | KeyCode::Char('e') => self.open_edit_selected(),
            KeyCode::Delete | KeyCode::Char('x') => self.remove_selected(),
            KeyCode::Char(' ') => self.grab_or_drop(),
            KeyCode::Esc => {
                if self.drag.dragging().is_some() {
                    self.drag.cancel();
                    self.status = Some("Drag cancelled".to_string());
                } else if self.filter.is_active() {
                    self.filter = Filter::default();
                    self.refresh();
                }
            }
            KeyCode::Char('/') => self.mode = InputMode::Search,
            KeyCode::Char('t') => {
                self.tag_options.cycle_next();
                self.apply_tag_selection();
            }
            KeyCode::Char('T') => {
                self.tag_options.cycle_prev();
                self.apply_tag_selection();
            }
            KeyCode::Char('m') => self.toggle_theme(),
            KeyCode::Char('E') => self.export(Utc::now().date_naive()),
            KeyCode::Char('I') => self.mode = InputMode::ImportPath(String::new()),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.mode = InputMode::Normal,
            KeyCode::Esc => {
                self.filter.query.clear();
                self.mode = InputMode::Normal;
                self.refresh();
            }
            KeyCode::Backspace => {
                self.filter.query.pop();
                self.refresh();
            }
            KeyCode::Char(c) => {
                self.filter.query.push(c);
                self.refresh();
            }
            _ => {}
        }
    }

    fn handle_import_key(&mut self, key: KeyEvent, mut path: String) {
        match key.code {
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                let path = path.trim();
                if !path.is_empty() {
                    self.import(Path::new(path));
                }
            }
            KeyCode::Esc => self.mode = InputMode::Normal,
            KeyCode::Backspace => {
                path.pop();
                self.mode = InputMode::ImportPath(path);
            }
            KeyCode::Char(c) => {
                path.push(c);
                self.mode = InputMode::ImportPath(path);
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.dialog = None,
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(action) = dialog.delete() {
                    self.dialog = None;
                    self.apply_dialog_action(action);
                }
            }
            KeyCode::Enter => {
                if let Some(action) = dialog.submit() {
                    self.dialog = None;
                    self.apply_dialog_action(action);
                }
            }
            KeyCode::Tab | KeyCode::Down => dialog.focus_next(),
            KeyCode::BackTab | KeyCode::Up => dialog.focus_prev(),
            KeyCode::Left | KeyCode::Right if dialog.focus == Field::Priority => {
                dialog.cycle_priority()
            }
            KeyCode::Backspace => dialog.backspace(),
            KeyCode::Char(c) => dialog.input(c),
            _ => {}
        }
    }

    pub fn open_new(&mut self) {
        self.dialog = Some(TaskDialog::open_new(self.selected_column));
    }

    pub fn open_edit_selected(&mut self) {
        let Some(task) = self
            .selected_task_id()
            .and_then(|id| self.board.task(id))
        else {
            return;
        };
        self.dialog = Some(TaskDialog::open_edit(task));
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.selected_task_id().cloned() {
            self.board.remove_task(&id);
            self.refresh();
        }
    }

    pub fn apply_dialog_action(&mut self, action: DialogAction) {
        debug!(?action, "dialog action");
        match action {
            DialogAction::Create(new) => {
                let id = self.board.add_task(new);
                self.refresh();
                self.select_task(&id);
            }
            DialogAction::Update(id, patch) => {
                self.board.update_task(&id, patch);
                self.refresh();
                self.select_task(&id);
            }
            DialogAction::Delete(id) => {
                self.board.remove_task(&id);
                self.refresh();
            }
        }
    }

    /// Space picks up the selected task, or drops the held one onto the
    /// focused column.
    pub fn grab_or_drop(&mut self) {
        if let Some(id) = self.drag.dragging().map(str::to_string) {
            self.drag.drop_into(&mut self.board, self.selected_column);
            self.refresh();
            self.select_task(&id);
            self.status = None;
        } else if let Some(id) = self.selected_task_id().cloned() {
            self.drag.start(id);
            self.status = Some("Moving task: pick a column and press Space".to_string());
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.board.set_theme(self.theme);
        self.refresh();
    }

    pub fn export(&mut self, today: NaiveDate) {
        match transfer::export_to_dir(&self.export_dir, self.board.state(), today) {
            Ok(path) => self.status = Some(format!("Exported to {}", path.display())),
            Err(err) => {
                error!(error = %err, "export failed");
                self.alert = Some(format!("Export failed: {err}"));
            }
        }
    }

    pub fn import(&mut self, path: &Path) {
        match transfer::import_into(&mut self.board, path) {
            Ok(count) => {
                self.drag.cancel();
                self.refresh();
                self.status = Some(format!("Imported {count} tasks"));
            }
            Err(err) => self.alert = Some(format!("Import failed: {err}")),
        }
    }

    fn focus_column(&mut self, col: Column) {
        if col != self.selected_column {
            self.selected_column = col;
            self.selected_task = 0;
        }
    }

    fn apply_tag_selection(&mut self) {
        self.filter.tag = self.tag_options.selected().map(str::to_string);
        self.refresh();
    }
}
