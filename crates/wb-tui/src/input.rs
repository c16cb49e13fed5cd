//! Keyboard command surface.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the presenter asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Draw the next word.
    Roll,
    /// Show the called-words list.
    OpenReview,
    /// Hide the called-words list.
    CloseReview,
    /// Scroll the called-words list up.
    ScrollUp,
    /// Scroll the called-words list down.
    ScrollDown,
    /// Start over with the full pool.
    Reset,
    /// Fire the confetti.
    Celebrate,
    /// Fire the confetti from the called-words list, once it has entries.
    CelebrateFromHistory,
    /// Switch presentation mode on or off.
    TogglePresentation,
    /// Show or hide the shortcut help.
    ToggleHelp,
    /// Leave the program.
    Quit,
}

/// Which overlay currently has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The main stage.
    #[default]
    Stage,
    /// The called-words list.
    Review,
    /// The help popup.
    Help,
}

/// Map a key press to a command for the given focus.
pub fn command_for(key: KeyEvent, focus: Focus) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return ctrl_command(key.code);
    }

    match focus {
        Focus::Stage => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Command::Roll),
            KeyCode::Char('u') | KeyCode::Char('U') => Some(Command::OpenReview),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            _ => None,
        },
        Focus::Review => match key.code {
            KeyCode::Esc
            | KeyCode::Enter
            | KeyCode::Char('q')
            | KeyCode::Char('u')
            | KeyCode::Char('U') => Some(Command::CloseReview),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Command::ScrollDown),
            KeyCode::Char('c') => Some(Command::CelebrateFromHistory),
            _ => None,
        },
        Focus::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Command::ToggleHelp),
            _ => None,
        },
    }
}

/// Ctrl shortcuts work regardless of focus.
fn ctrl_command(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Celebrate),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePresentation),
        _ => None,
    }
}
