use crate::{
    kanban_board::KanbanBoard,
    task::{Column, TaskId},
};
use tracing::debug;

/// Keyboard stand-in for pointer drag-and-drop: one task may be held at a
/// time and is dropped onto a whole column. There is no ordering within a
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragging: Option<TaskId>,
}

impl DragState {
    pub fn start(&mut self, id: impl Into<TaskId>) {
        let id = id.into();
        debug!(id = %id, "drag start");
        self.dragging = Some(id);
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn is_dragging(&self, id: &str) -> bool {
        self.dragging.as_deref() == Some(id)
    }

    pub fn cancel(&mut self) {
        self.dragging = None;
    }

    /// Takes the held id, pairing it with the target column.
    pub fn drop_on(&mut self, col: Column) -> Option<(TaskId, Column)> {
        self.dragging.take().map(|id| (id, col))
    }

    /// Drops the held task onto `col`, changing only its column. Returns
    /// whether a task was moved.
    pub fn drop_into(&mut self, board: &mut KanbanBoard, col: Column) -> bool {
        match self.drop_on(col) {
            Some((id, col)) => {
                debug!(id = %id, ?col, "drop");
                board.move_task(&id, col)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{NewTask, Task};

    #[test]
    fn drop_without_drag_does_nothing() {
        let mut drag = DragState::default();
        let mut board = KanbanBoard::in_memory();
        board.add_task(NewTask::new("idle"));
        assert!(!drag.drop_into(&mut board, Column::Done));
        assert_eq!(board.tasks()[0].col, Column::Backlog);
    }

    #[test]
    fn drop_consumes_the_dragged_id() {
        let mut drag = DragState::default();
        drag.start("abc");
        assert!(drag.is_dragging("abc"));
        assert_eq!(drag.drop_on(Column::Review), Some(("abc".to_string(), Column::Review)));
        assert_eq!(drag.dragging(), None);
    }

    #[test]
    fn drop_changes_only_the_column() {
        let mut board = KanbanBoard::in_memory();
        let id = board.add_task(NewTask::new("A").desc("d").tags("x,y"));
        let before = board.task(&id).cloned().unwrap();

        let mut drag = DragState::default();
        drag.start(id.clone());
        assert!(drag.drop_into(&mut board, Column::Progress));

        let after = board.task(&id).unwrap();
        assert_eq!(after.col, Column::Progress);
        assert_eq!(
            Task {
                col: before.col,
                ..after.clone()
            },
            before
        );
    }
}
