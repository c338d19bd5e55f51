use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use taskboard::{filter::EMPTY_COLUMN_HINT, ui, App, Column, KanbanBoard, NewTask};

fn render(app: &App) -> String {
    let backend = TestBackend::new(140, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn empty_board_shows_placeholders_in_every_column() {
    let app = App::new(KanbanBoard::in_memory(), std::env::temp_dir());
    let screen = render(&app);
    for col in Column::ALL {
        assert!(screen.contains(col.title()), "missing {}", col.title());
    }
    assert!(screen.contains("Drop tasks"));
    assert!(EMPTY_COLUMN_HINT.starts_with("Drop tasks"));
    assert!(screen.contains("All tags"));
}

#[test]
fn cards_and_counts_are_drawn() {
    let mut board = KanbanBoard::in_memory();
    board.add_task(NewTask::new("Ship it").tags("release").col(Column::Done));
    let app = App::new(board, std::env::temp_dir());
    let screen = render(&app);

    assert!(screen.contains("Ship it"));
    assert!(screen.contains("#release"));
    assert!(screen.contains("Done (1)"));
    assert!(screen.contains("Backlog (0)"));
}

#[test]
fn dialog_and_alert_overlay_the_board() {
    let mut app = App::new(KanbanBoard::in_memory(), std::env::temp_dir());
    app.open_new();
    assert!(render(&app).contains("New Task"));

    app.dialog = None;
    app.alert = Some("Import failed: Invalid file format".to_string());
    let screen = render(&app);
    assert!(screen.contains("Import failed"));
    assert!(screen.contains("Press any key"));
}
