//! Called-words review modal.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::BingoApp;
use crate::shared::{centered_rect, surface_ready};

/// Gap between grid columns.
const COLUMN_GAP: usize = 2;

/// Draw the review modal over the whole frame.
///
/// Records how far the grid can scroll at this size and pulls
/// `review_scroll` back inside that range.
pub fn draw(frame: &mut Frame, app: &mut BingoApp) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Called Words ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if surface_ready(inner, 20, 4).is_err() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Stats
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Grid
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    let grid = chunks[2];
    let max_scroll = {
        let called = app.machine.pool().called();
        let columns = column_count(cell_width(called), usize::from(grid.width));
        called
            .len()
            .div_ceil(columns)
            .saturating_sub(usize::from(grid.height))
    };
    app.review_max_scroll = max_scroll;
    app.review_scroll = app.review_scroll.min(max_scroll);
    let app: &BingoApp = app;

    let pool = app.machine.pool();
    let stats = Line::from(vec![
        Span::styled("Total Rolled Words: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            pool.called_count().to_string(),
            Style::default().fg(Color::White).bold(),
        ),
        Span::raw("    "),
        Span::styled("Remaining: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            pool.remaining_count().to_string(),
            Style::default().fg(Color::White).bold(),
        ),
    ]);
    frame.render_widget(Paragraph::new(stats), chunks[0]);

    let called = pool.called();
    if called.is_empty() {
        let empty = Paragraph::new("No words have been called yet.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, grid);
    } else {
        let rows = grid_rows(
            called,
            usize::from(grid.width),
            usize::from(grid.height),
            app.review_scroll,
        );
        frame.render_widget(Paragraph::new(rows), grid);
    }

    let mut footer = vec![Span::styled("Esc: close", Style::default().fg(Color::DarkGray))];
    if !called.is_empty() {
        footer.push(Span::raw("   "));
        footer.push(Span::styled(
            "c: celebrate",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(footer)).alignment(Alignment::Right),
        chunks[3],
    );
}

/// Width of the widest `#n WORD` label.
fn cell_width(words: &[String]) -> usize {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| format!("#{}", i + 1).len() + 1 + w.chars().count())
        .max()
        .unwrap_or(1)
}

/// How many cells fit side by side in `width`.
fn column_count(cell_width: usize, width: usize) -> usize {
    ((width + COLUMN_GAP) / (cell_width + COLUMN_GAP)).max(1)
}

/// Lay out `#n WORD` entries row by row, starting at row `scroll`.
fn grid_rows(words: &[String], width: usize, height: usize, scroll: usize) -> Vec<Line<'static>> {
    let labels: Vec<(String, &str)> = words
        .iter()
        .enumerate()
        .map(|(i, w)| (format!("#{}", i + 1), w.as_str()))
        .collect();
    let cell_width = cell_width(words);
    let columns = column_count(cell_width, width);
    let total_rows = labels.len().div_ceil(columns);
    let first = scroll.min(total_rows.saturating_sub(height));

    labels
        .chunks(columns)
        .skip(first)
        .take(height)
        .map(|row| {
            let mut spans = Vec::new();
            for (col, (number, word)) in row.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" ".repeat(COLUMN_GAP)));
                }
                let used = number.chars().count() + 1 + word.chars().count();
                spans.push(Span::styled(
                    number.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    word.to_string(),
                    Style::default().fg(Color::Cyan).bold(),
                ));
                spans.push(Span::raw(" ".repeat(cell_width - used)));
            }
            Line::from(spans)
        })
        .collect()
}
