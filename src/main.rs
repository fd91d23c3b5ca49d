//! bap-tui - the bap media library screen in the terminal.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use tokio::sync::mpsc;
use tracing_subscriber::prelude::*;

mod action;
mod app;
mod artwork;
mod config;
mod icon;
mod model;
mod snapshot;
mod store;
mod tui;
mod ui;

use action::Action;
use app::App;
use config::Config;
use snapshot::Snapshot;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "bap-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Library snapshot (JSON) to show instead of the built-in sample
    #[arg(short, long)]
    library: Option<PathBuf>,

    /// Number of grid columns (overrides config)
    #[arg(long)]
    columns: Option<usize>,

    /// Never load cover artwork
    #[arg(long)]
    no_artwork: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hooks
    tui::install_hooks()?;

    // Initialize logging
    let log_file = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bap-tui")
        .join("bap-tui.log");

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_subscriber::fmt::layer()
        .with_writer(std::fs::File::create(&log_file)?)
        .with_ansi(false);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::sink) // Don't write to stdout in TUI mode
        .finish()
        .with(file_appender)
        .try_init()
        .ok();

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default configuration: {}", e);
            Config::default()
        }),
    };

    // Apply command-line overrides
    if let Some(columns) = args.columns {
        config.ui.columns = columns.clamp(1, crate::config::MAX_COLUMNS);
    }
    if args.no_artwork {
        config.ui.show_artwork = false;
    }

    // Load the library before touching the terminal so errors print normally
    let snapshot = match &args.library {
        Some(path) => Snapshot::load(path)?,
        None => Snapshot::sample(),
    };

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Initialize terminal
    let mut terminal = tui::init()?;

    let picker = if config.ui.show_artwork {
        tui::graphics_picker()
    } else {
        None
    };

    // Create and initialize application
    let mut app = App::new(&config, snapshot, picker, action_tx.clone());
    app.init();

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        // Render UI
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Handle events with timeout
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        let action = handle_key_event(key.code, key.modifiers, &app);
                        if action != Action::None {
                            action_tx.send(action)?;
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse);
                    if action != Action::None {
                        action_tx.send(action)?;
                    }
                }
                Event::Resize(width, height) => {
                    action_tx.send(Action::Resize(width, height))?;
                }
                _ => {}
            }
        }

        // Send tick action
        action_tx.send(Action::Tick)?;

        // Process all pending actions
        while let Ok(action) = action_rx.try_recv() {
            if let Err(e) = app.handle_action(action) {
                tracing::error!("Action failed: {}", e);
                action_tx.send(Action::Error(e.to_string()))?;
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    tui::restore()?;

    Ok(())
}

/// Map key events to actions.
fn handle_key_event(code: KeyCode, modifiers: KeyModifiers, app: &App) -> Action {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Handle help overlay
    if app.show_help {
        return match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::HideHelp,
            _ => Action::None,
        };
    }

    // Handle error overlay
    if app.error_message.is_some() {
        return match code {
            KeyCode::Esc | KeyCode::Char('x') => Action::ClearError,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    // Handle the item action sheet
    if app.sheet.is_some() {
        return match code {
            KeyCode::Up | KeyCode::Char('k') => Action::SheetUp,
            KeyCode::Down | KeyCode::Char('j') => Action::SheetDown,
            KeyCode::Enter => Action::SheetInvoke,
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => Action::CloseActions,
            // Playback stays reachable while the sheet is open
            KeyCode::Char(' ') => Action::TogglePlayback,
            _ => Action::None,
        };
    }

    match code {
        KeyCode::Char('q') => Action::Quit,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Action::NavigateUp,
        KeyCode::Down | KeyCode::Char('j') => Action::NavigateDown,
        KeyCode::Left | KeyCode::Char('h') => Action::NavigateLeft,
        KeyCode::Right | KeyCode::Char('l') => Action::NavigateRight,
        KeyCode::Char('g') | KeyCode::Home => Action::JumpToTop,
        KeyCode::Char('G') | KeyCode::End => Action::JumpToBottom,
        KeyCode::Enter => Action::Select,

        // Item actions
        KeyCode::Char('m') => Action::OpenActions,

        // Playback
        KeyCode::Char(' ') => Action::TogglePlayback,
        KeyCode::Char('.') => Action::SeekForward,
        KeyCode::Char(',') => Action::SeekBackward,
        KeyCode::Char('s') => Action::Stop,

        // Header actions
        KeyCode::Char('a') => app.header_shortcut("add"),
        KeyCode::Char('/') => app.header_shortcut("search"),

        // Help
        KeyCode::Char('?') => Action::ShowHelp,

        _ => Action::None,
    }
}

/// Handle mouse events.
fn handle_mouse_event(mouse: crossterm::event::MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::Down(crossterm::event::MouseButton::Left) => {
            Action::MouseClick(mouse.column, mouse.row)
        }
        MouseEventKind::ScrollUp => Action::MouseScroll(-1),
        MouseEventKind::ScrollDown => Action::MouseScroll(1),
        _ => Action::None,
    }
}
