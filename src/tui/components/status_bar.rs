// Status bar component
//
// Caret/selection, length, last activated key and key hints. Hints shrink on
// narrow terminals.

use crate::keyboard::EditTarget;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Below this width only the short hint set is shown
const NARROW_WIDTH: u16 = 90;

pub fn status_text(app: &App, width: u16) -> String {
    let (start, end) = app.field.selection();
    let position = if start == end {
        format!("caret {}", start)
    } else {
        format!("sel {}–{}", start, end)
    };

    let last = match app.last_activation.as_deref() {
        Some(" ") => "space".to_string(),
        Some(label) => label.to_string(),
        None => "–".to_string(),
    };

    let hints = if width < NARROW_WIDTH {
        "^Q quit"
    } else {
        "^Q quit · F2 logs · F3 theme · Esc blur"
    };

    format!(
        " {} │ {} chars │ last: {} │ {}",
        position,
        app.field.len(),
        last,
        hints
    )
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(status_text(app, area.width))
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
