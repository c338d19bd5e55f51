pub mod app;
pub mod config;
pub mod dialog;
pub mod drag;
pub mod error;
pub mod filter;
pub mod kanban_board;
pub mod logging;
pub mod storage;
pub mod task;
pub mod theme;
pub mod transfer;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use kanban_board::{BoardState, KanbanBoard};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use task::{Column, NewTask, Priority, Task, TaskId, TaskPatch};
