use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use std::io::stdout;
use tracing::{info, warn};

use designer::config::{self, ConfigManager};
use designer::{logging, App};

#[tokio::main]
async fn main() -> Result<()> {
    let user_dir = config::user_dir();
    tokio::fs::create_dir_all(&user_dir).await?;

    // A broken config file falls back to defaults; report it once logging is up
    let mut config_manager = ConfigManager::new(&user_dir);
    let config_error = config_manager.load().err();
    let config = config_manager.into_config();

    let log_path = logging::init(&user_dir, &config.log)?;
    info!(log = %log_path.display(), "formdesk starting");
    if let Some(e) = config_error {
        warn!("Ignoring config: {:#}", e);
    }

    let mouse = config.ui.mouse;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_config(config, user_dir);
    let result = app.run(&mut terminal).await;

    // Restore the terminal
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        ratatui::crossterm::cursor::Show
    )?;

    info!(fields = app.form.len(), "formdesk exiting");

    // Handle any final errors
    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(e)
        }
    }
}
