//! The main stage: current word, counter, controls, hints.

use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::bigword;
use crate::app::BingoApp;
use crate::shared::{SHORTCUTS_HINT, surface_ready};

/// Draw the stage into `area`.
pub fn draw(frame: &mut Frame, app: &BingoApp, area: Rect, now: Instant) {
    if surface_ready(area, 10, 3).is_err() {
        return;
    }

    let token = app.machine.display_token();
    let big = if app.presentation {
        bigword::render(token).filter(|_| bigword::width_of(token) <= usize::from(area.width))
    } else {
        None
    };
    let word_height = if big.is_some() {
        bigword::GLYPH_HEIGHT
    } else {
        1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Presentation indicator
            Constraint::Min(0),              // Spacer
            Constraint::Length(word_height), // Word
            Constraint::Length(1),           // Counter
            Constraint::Length(1),           // Spacer
            Constraint::Length(1),           // Controls
            Constraint::Min(0),              // Spacer
            Constraint::Length(1),           // Shortcut hints
            Constraint::Length(1),           // Footer
        ])
        .split(area);

    if app.presentation {
        let indicator = Paragraph::new("PRESENTATION MODE \u{2022} Ctrl+P to toggle")
            .style(Style::default().fg(Color::Magenta).bold())
            .alignment(Alignment::Center);
        frame.render_widget(indicator, chunks[0]);
    }

    let style = word_style(app, now);
    let word = match big {
        Some(lines) => Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>()),
        None => Paragraph::new(token.to_string()),
    };
    frame.render_widget(word.style(style).alignment(Alignment::Center), chunks[2]);

    let called = app.machine.pool().called_count();
    if called > 0 {
        let counter = Paragraph::new(format!("Words Called: {called}"))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(counter, chunks[3]);
    }

    frame.render_widget(
        Paragraph::new(controls_line(app)).alignment(Alignment::Center),
        chunks[5],
    );

    if !app.presentation {
        let hints = Paragraph::new(SHORTCUTS_HINT)
            .style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(hints, chunks[7]);

        let footer = Paragraph::new(format!("wordbingo {}", env!("CARGO_PKG_VERSION")))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right);
        frame.render_widget(footer, chunks[8]);
    }
}

/// Word style, pulsing from dim to bold at the start of a roll.
fn word_style(app: &BingoApp, now: Instant) -> Style {
    if app.machine.is_rolling() {
        let style = Style::default().fg(Color::Yellow);
        if app.pulse(now) < 0.5 {
            style.add_modifier(Modifier::DIM)
        } else {
            style.bold()
        }
    } else {
        Style::default().fg(Color::Cyan).bold()
    }
}

/// Roll, used-words and reset controls.
fn controls_line(app: &BingoApp) -> Line<'static> {
    let machine = &app.machine;
    let mut spans = Vec::new();

    if machine.is_rolling() {
        spans.push(Span::styled(
            "[ ... ]",
            Style::default().fg(Color::Yellow).bold(),
        ));
    } else if machine.can_roll() {
        spans.push(Span::styled(
            "[ ROLL ]",
            Style::default().fg(Color::Black).bg(Color::Green).bold(),
        ));
    } else {
        spans.push(Span::styled(
            "[ ROLL ]",
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            " no words left",
            Style::default().fg(Color::DarkGray),
        ));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        "[ USED WORDS ]",
        Style::default().fg(Color::White),
    ));

    if machine.pool().called_count() > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "[ \u{21bb} Ctrl+R ]",
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::audio::Cue;
    use wb_core::{SCRAMBLE_DURATION, WordList};

    fn screen(app: &BingoApp, now: Instant, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw(frame, app, area, now);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..height {
            for x in 0..width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app(words: &[&str]) -> BingoApp {
        BingoApp::new(WordList::new(words), Some(7), Cue::silent())
    }

    #[test]
    fn shows_placeholder_and_hints() {
        let app = app(&["CAT"]);
        let text = screen(&app, Instant::now(), 140, 12);
        assert!(text.contains("READY?"));
        assert!(text.contains("[ ROLL ]"));
        assert!(text.contains("Space/Enter: Roll"));
        assert!(!text.contains("Words Called"));
    }

    #[test]
    fn shows_settled_word_and_counter() {
        let mut app = app(&["CAT"]);
        let t0 = Instant::now();
        app.roll(t0);
        let rolling = screen(&app, t0, 140, 12);
        assert!(rolling.contains("[ ... ]"));

        app.tick(t0 + SCRAMBLE_DURATION);
        let text = screen(&app, t0 + SCRAMBLE_DURATION, 140, 12);
        assert!(text.contains("CAT"));
        assert!(text.contains("Words Called: 1"));
        assert!(text.contains("no words left"));
    }

    #[test]
    fn presentation_mode_uses_block_letters() {
        let mut app = app(&["CAT"]);
        app.presentation = true;
        let text = screen(&app, Instant::now(), 80, 14);
        assert!(text.contains("PRESENTATION MODE"));
        assert!(text.contains('\u{2588}'));
        assert!(!text.contains("Space/Enter"));
    }

    #[test]
    fn tiny_area_draws_nothing() {
        let app = app(&["CAT"]);
        let text = screen(&app, Instant::now(), 8, 2);
        assert!(text.chars().all(|c| c == ' ' || c == '\n'));
    }
}
