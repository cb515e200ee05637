//! Logs panel component
//!
//! Shows the newest entries from the in-memory log buffer, color-coded by
//! level. Always follows the tail; toggled with F2.

use crate::logging::{LogBuffer, LogEntry, LogLevel};
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Rows the panel takes when shown (entries + borders)
pub const PANEL_HEIGHT: u16 = 8;

pub fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:<5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn level_style(level: LogLevel, theme: &Theme) -> Style {
    let color = match level {
        LogLevel::Error => theme.log_error,
        LogLevel::Warn => theme.log_warn,
        LogLevel::Info => theme.log_info,
        LogLevel::Debug => theme.log_debug,
        LogLevel::Trace => theme.log_trace,
    };
    Style::default().fg(color)
}

pub fn render(f: &mut Frame, area: Rect, buffer: &LogBuffer, theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = buffer
        .recent(visible)
        .iter()
        .map(|entry| ListItem::new(format_entry(entry)).style(level_style(entry.level, theme)))
        .collect();

    let title = format!(" Logs ({}) ", buffer.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(false))
            .title(title),
    );

    f.render_widget(list, area);
}
