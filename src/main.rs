//! Sõnamäng - Estonian tile-placement word game in the terminal
//!
//! Place tiles. Cross words. Spend the premiums.

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use sonamang::app::{App, Direction};
use sonamang::cli::Cli;
use sonamang::config::GameConfig;
use sonamang::game::{Game, WordList};
use sonamang::tui::{self, Tui};
use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if !cli.players.is_empty() {
        config.players = cli.players.clone();
    }

    let words = load_words(cli.words.as_deref())?;
    info!(words = words.len(), "word list loaded");

    let game = match cli.seed {
        Some(seed) => Game::with_seed(&config, words, seed)?,
        None => Game::new(&config, words)?,
    };
    let mut app = App::new(game);

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let poll_rate = Duration::from_millis(250);
    loop {
        terminal.draw(|frame| tui::render(frame, &app))?;

        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => app.quit(),
                        KeyCode::Enter => app.on_submit(),
                        KeyCode::Tab => app.on_pass(),
                        KeyCode::Backspace | KeyCode::Delete => app.on_backspace(),
                        KeyCode::Up => app.move_cursor(Direction::Up),
                        KeyCode::Down => app.move_cursor(Direction::Down),
                        KeyCode::Left => app.move_cursor(Direction::Left),
                        KeyCode::Right => app.move_cursor(Direction::Right),
                        KeyCode::Char(c) => app.on_char(c),
                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    terminal.exit()?;
    info!(turns = app.game.history().len(), "session ended");
    Ok(())
}

/// Send logs to `path`; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let log_file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Word list from `--words`, else the data directory, else the builtin list
fn load_words(path: Option<&Path>) -> Result<WordList, Box<dyn Error>> {
    if let Some(path) = path {
        return Ok(WordList::load(path)?);
    }
    match WordList::default_path() {
        Ok(path) if path.exists() => Ok(WordList::load(&path)?),
        Ok(path) => {
            warn!(path = %path.display(), "no word list found, using builtin words");
            Ok(WordList::builtin())
        }
        Err(err) => {
            warn!(error = %err, "using builtin words");
            Ok(WordList::builtin())
        }
    }
}
