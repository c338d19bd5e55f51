use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use taskboard::{logging, ui, App, Config, FileStore, KanbanBoard};
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    logging::init_logging(&config.log_level, &config.data_dir).context("starting logging")?;

    let store = FileStore::open(&config.data_dir).context("opening board storage")?;
    let mut board = KanbanBoard::open(Box::new(store));
    if config.seed_demo && board.seed_if_empty() {
        info!("seeded example tasks");
    }
    let mut app = App::new(board, config.export_dir.clone());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = %err, "terminal loop failed");
    }
    info!("exiting");
    result.context("running board")
}
