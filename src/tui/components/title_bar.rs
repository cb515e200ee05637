// Title bar component
//
// App name on the left, focus state after it, theme name on the right.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let focus = if app.is_focused() {
        "● typing into field"
    } else {
        "◦ no focus: keys are inactive"
    };
    let title_text = format!(" ⌨  keytap ──── {}", focus);

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(format!(" {} ", app.theme_kind.name())).right_aligned()),
        );

    f.render_widget(title, area);
}
