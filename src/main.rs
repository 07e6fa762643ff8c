mod app;
mod error;
mod git;
mod ui;

use anyhow::{Context, Result};
use app::{App, InputMode, Mode};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use ui::styles::Theme;

/// Browse the git history of a single file
#[derive(Parser)]
#[command(name = "gfh", version, about)]
struct Cli {
    /// File path, relative to the current directory or absolute
    path: String,
}

fn main() -> Result<()> {
    // clap exits 2 on bad arguments by default; this tool promises exit 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    // Initial history load happens before any UI is drawn; a failure here
    // is fatal with a plain message on stderr
    let commits = git::load_history(&cli.path)
        .with_context(|| format!("failed to load history for '{}'", cli.path))?;

    let mut app = App::new(
        cli.path,
        commits,
        Box::new(git::GitDiffSource::new()),
    );
    let theme = Theme::default();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Seed geometry; afterwards only resize events update it
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let result = run_app(&mut terminal, &mut app, &theme);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// The event loop: draw, then dispatch at most one event to the state
/// machine, strictly in arrival order. Diff fetches block the loop for
/// their (short, local) duration.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, theme: &Theme) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, theme))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => match app.input_mode {
                    InputMode::Filter => handle_filter_input(app, key),
                    InputMode::Normal => handle_normal_input(app, key),
                },
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_normal_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Force quit, any mode
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Back out of the diff, or quit from the list
        KeyCode::Char('q') | KeyCode::Esc => app.back(),

        KeyCode::Enter => app.open_diff(),

        // Single-step: selection in the list, one line in the viewport
        KeyCode::Char('j') | KeyCode::Down => match app.mode {
            Mode::List => app.select_next(),
            Mode::Diff => app.scroll_down(1),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.mode {
            Mode::List => app.select_prev(),
            Mode::Diff => app.scroll_up(1),
        },

        // Navigate-with-refetch, diff mode only
        KeyCode::Char('J') if app.mode == Mode::Diff => app.select_next(),
        KeyCode::Char('K') if app.mode == Mode::Diff => app.select_prev(),

        // Viewport jumps and paging
        KeyCode::Char('g') if app.mode == Mode::Diff => app.jump_top(),
        KeyCode::Char('G') if app.mode == Mode::Diff => app.jump_bottom(),
        KeyCode::PageDown if app.mode == Mode::Diff => {
            app.scroll_down(app.layout.viewport.max(1));
        }
        KeyCode::PageUp if app.mode == Mode::Diff => {
            app.scroll_up(app.layout.viewport.max(1));
        }

        // Live filter, list mode only
        KeyCode::Char('/') if app.mode == Mode::List => {
            app.input_mode = InputMode::Filter;
        }

        _ => {}
    }
}

fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Force quit works here too; must beat the catch-all char arm
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Esc => {
            app.filter_clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.filter_pop(),
        KeyCode::Char(c) => app.filter_push(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.mode != Mode::Diff {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_down(3),
        MouseEventKind::ScrollUp => app.scroll_up(3),
        _ => {}
    }
}
