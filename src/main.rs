use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use kasparro::config::AppConfig;
use kasparro::core::fixtures::FixtureStore;
use kasparro::core::logging;
use kasparro::tui::app::AppState;
use kasparro::tui::services::Services;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();

    // Initialize logging
    let _log_guard = logging::init_tui(&config.log_dir());
    log::info!("Kasparro v{} starting", kasparro::VERSION);

    // Fixtures must validate before the terminal is touched
    let fixtures = match FixtureStore::load(&config.fixture_source()) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            logging::report_fatal(e);
            std::process::exit(1);
        }
    };

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::new(fixtures, event_tx);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let mut app = AppState::new(event_rx, services, config.tui.start_view.into());
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("Event loop failed: {e}");
        logging::print_error(&format!("Error: {e}"));
        std::process::exit(1);
    }

    log::info!("Kasparro exiting");
    Ok(())
}
