//! Screen composition: stage, overlays, and confetti on top.

pub mod bigword;
pub mod review;
pub mod stage;

use std::time::Instant;

use ratatui::prelude::*;

use crate::app::BingoApp;
use crate::input::Focus;

/// Draw the whole screen for `now`.
pub fn draw(frame: &mut Frame, app: &mut BingoApp, now: Instant) {
    let area = frame.area();
    stage::draw(frame, app, area, now);

    match app.focus {
        Focus::Review => review::draw(frame, app),
        Focus::Help => crate::shared::draw_help_popup(frame),
        Focus::Stage => {}
    }

    // Confetti sits above everything, overlays included.
    app.confetti.draw(frame, area, now);
}
