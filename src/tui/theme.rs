// Theme system for the TUI
//
// Built-in palettes, selectable by name from config/CLI and cyclable at
// runtime with F3.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
    Nord,
}

impl ThemeKind {
    pub fn all() -> &'static [ThemeKind] {
        &[ThemeKind::Dark, ThemeKind::Light, ThemeKind::Nord]
    }

    /// Look up a theme by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn next(self) -> Self {
        let themes = Self::all();
        let current = themes.iter().position(|&t| t == self).unwrap_or(0);
        themes[(current + 1) % themes.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
            ThemeKind::Nord => "nord",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
            ThemeKind::Nord => Theme::nord(),
        }
    }
}

/// Resolved colors for every UI element
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    pub title: Color,
    pub status_bar: Color,

    // Keys
    pub key_fg: Color,
    pub key_secondary: Color,
    pub key_active_bg: Color,
    pub key_active_fg: Color,

    // Text field
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub caret: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
    pub log_trace: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            border: Color::Gray,
            border_focused: Color::Cyan,
            border_type: BorderType::Rounded,

            title: Color::Cyan,
            status_bar: Color::Green,

            key_fg: Color::White,
            key_secondary: Color::Yellow,
            key_active_bg: Color::Cyan,
            key_active_fg: Color::Black,

            selection_bg: Color::Blue,
            selection_fg: Color::White,
            caret: Color::Cyan,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
            log_trace: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            border_type: BorderType::Plain,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            key_fg: Color::Black,
            key_secondary: Color::Magenta,
            key_active_bg: Color::Blue,
            key_active_fg: Color::White,

            selection_bg: Color::LightBlue,
            selection_fg: Color::Black,
            caret: Color::Blue,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11), // Dark goldenrod
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
            log_trace: Color::Gray,
        }
    }

    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            border: Color::Rgb(76, 86, 106),
            border_focused: Color::Rgb(136, 192, 208),
            border_type: BorderType::Rounded,

            title: Color::Rgb(136, 192, 208),
            status_bar: Color::Rgb(163, 190, 140),

            key_fg: Color::Rgb(229, 233, 240),
            key_secondary: Color::Rgb(235, 203, 139),
            key_active_bg: Color::Rgb(129, 161, 193),
            key_active_fg: Color::Rgb(46, 52, 64),

            selection_bg: Color::Rgb(67, 76, 94),
            selection_fg: Color::Rgb(236, 239, 244),
            caret: Color::Rgb(143, 188, 187),

            log_error: Color::Rgb(191, 97, 106),
            log_warn: Color::Rgb(235, 203, 139),
            log_info: Color::Rgb(129, 161, 193),
            log_debug: Color::Rgb(216, 222, 233),
            log_trace: Color::Rgb(76, 86, 106),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn key_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.key_active_fg)
                .bg(self.key_active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.key_fg)
        }
    }

    pub fn selection_style(&self) -> Style {
        Style::default().fg(self.selection_fg).bg(self.selection_bg)
    }

    pub fn caret_style(&self) -> Style {
        Style::default().fg(self.key_active_fg).bg(self.caret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_lookup_is_case_insensitive() {
        assert_eq!(ThemeKind::from_name("Nord"), Some(ThemeKind::Nord));
        assert_eq!(ThemeKind::from_name(" light "), Some(ThemeKind::Light));
        assert_eq!(ThemeKind::from_name("dracula"), None);
    }

    #[test]
    fn next_cycles_through_all() {
        let mut kind = ThemeKind::Dark;
        for _ in 0..ThemeKind::all().len() {
            kind = kind.next();
        }
        assert_eq!(kind, ThemeKind::Dark);
    }
}
