//! Shared utilities for views: layout helpers and the help popup.

use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use wb_core::{BingoError, BingoResult};

/// Keyboard shortcuts shown in the hint line.
pub const SHORTCUTS_HINT: &str = "Space/Enter: Roll \u{2022} U: Used Words \u{2022} Ctrl+R: Reset \u{2022} Ctrl+C: Confetti \u{2022} Ctrl+P: Presentation Mode \u{2022} ?: Help \u{2022} q: Quit";

/// Check that `area` can hold content of the given size.
///
/// Views treat a failure as "nothing to draw yet".
pub fn surface_ready(area: Rect, min_width: u16, min_height: u16) -> BingoResult<()> {
    if area.width < min_width || area.height < min_height {
        return Err(BingoError::AnimationTargetMissing);
    }
    Ok(())
}

/// The part of `area` covering `percent_x` by `percent_y`, centered.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [band] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(band);
    popup
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Stage:"),
        Line::from("  Space/Enter  Roll the next word"),
        Line::from("  u            Show called words"),
        Line::from("  Ctrl+R       Reset the game"),
        Line::from("  Ctrl+C       Confetti"),
        Line::from("  Ctrl+P       Toggle presentation mode"),
        Line::from(""),
        Line::from("Called words:"),
        Line::from("  j / k        Scroll"),
        Line::from("  c            Celebrate"),
        Line::from("  Esc          Close"),
        Line::from(""),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Esc      Quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}
