use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io;
use std::time::Duration;

mod actions;
mod app;
mod app_config;
mod components;
mod logger;
mod pages;
mod paths;
mod reducer;
mod routes;
mod state;

use app::App;
use app_config::AppConfig;

fn main() -> Result<()> {
    let log_file = logger::init()?;

    log::info!("Starting redux-hooks-app, logging to {}", log_file.display());

    let config = AppConfig::load();
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("Exiting with error: {:#}", err);
    }

    log::info!("Exiting redux-hooks-app");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(app.config().tick_rate_ms);

    while app.is_running() {
        // Draw once per committed render cycle batch, not per component
        if app.take_redraw() {
            terminal.draw(|frame| app.render(frame))?;
        }

        if event::poll(tick_rate)? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key)?,
                Event::Resize(_, _) => app.request_redraw(),
                _ => {}
            }
        }

        app.tick()?;
    }

    Ok(())
}
