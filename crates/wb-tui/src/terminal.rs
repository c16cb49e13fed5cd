//! Terminal setup, teardown, and main event loop.

use std::io;
use std::time::Instant;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use crate::app::BingoApp;
use crate::input::command_for;
use crate::views;

/// Errors from the terminal layer.
#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    /// Raw mode or alternate screen could not be set up.
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    /// Drawing a frame failed.
    #[error("draw error: {0}")]
    Draw(#[source] io::Error),

    /// Reading input failed.
    #[error("event error: {0}")]
    Event(#[source] io::Error),
}

/// Launch the TUI application.
pub fn run(mut app: BingoApp) -> Result<(), TuiError> {
    enable_raw_mode().map_err(TuiError::Terminal)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(TuiError::Terminal(e));
    }

    let backend = CrosstermBackend::new(stdout);
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => {
            let result = run_loop(&mut terminal, &mut app);
            terminal.show_cursor().ok();
            result
        }
        Err(e) => Err(TuiError::Terminal(e)),
    };

    app.shutdown();
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    result
}

/// Main event loop.
///
/// Waits for input at most until the next timer deadline, then advances
/// the app's timers and redraws if anything changed.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut BingoApp,
) -> Result<(), TuiError> {
    let mut dirty = true;
    loop {
        let now = Instant::now();
        if app.tick(now) {
            dirty = true;
        }
        if dirty {
            terminal
                .draw(|frame| views::draw(frame, app, now))
                .map_err(TuiError::Draw)?;
            dirty = false;
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(app.poll_timeout(Instant::now())).map_err(TuiError::Event)? {
            let event = event::read().map_err(TuiError::Event)?;
            dirty |= handle_event(app, event);
        }
    }
}

/// Handle a crossterm event. Returns true if the screen needs a redraw.
fn handle_event(app: &mut BingoApp, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key(app, key);
            true
        }
        Event::Resize(_, _) => true,
        _ => false,
    }
}

/// Route a key press through the command map.
fn handle_key(app: &mut BingoApp, key: KeyEvent) {
    if let Some(command) = command_for(key, app.focus) {
        tracing::trace!(?command, "key command");
        app.apply(command, Instant::now());
    }
}
