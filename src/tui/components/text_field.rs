//! Text field component
//!
//! The host input the keyboard types into. It owns the value and selection,
//! accepts native terminal typing, and coerces selection offsets the way a
//! host text control does: offsets past the end clamp to the end, and a
//! reversed range is reordered.

use crate::keyboard::edit::{byte_index, splice_chars};
use crate::keyboard::EditTarget;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    /// Fixed end of the selection
    anchor: usize,
    /// Moving end of the selection (where the caret is drawn)
    head: usize,
}

impl TextField {
    /// Field holding `value` with the caret at the end
    pub fn new(value: impl Into<String>) -> Self {
        let mut field = Self::default();
        field.set_value(value.into());
        field
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.head
    }

    /// 0-based line the caret sits on
    pub fn caret_line(&self) -> usize {
        self.value
            .chars()
            .take(self.head)
            .filter(|&c| c == '\n')
            .count()
    }

    // ─── Native editing (physical keys while focused) ────────────────────

    /// Insert text at the caret, replacing any selection
    pub fn insert(&mut self, text: &str) {
        let (start, end) = self.selection();
        let from = byte_index(&self.value, start);
        let to = byte_index(&self.value, end);
        self.value.replace_range(from..to, text);
        self.collapse(start + text.chars().count());
    }

    pub fn delete_backward(&mut self) {
        let (start, end) = self.selection();
        if start != end {
            self.value = splice_chars(&self.value, start, end - start);
            self.collapse(start);
        } else if start > 0 {
            self.value = splice_chars(&self.value, start - 1, 1);
            self.collapse(start - 1);
        }
    }

    pub fn delete_forward(&mut self) {
        let (start, end) = self.selection();
        if start != end {
            self.value = splice_chars(&self.value, start, end - start);
        } else if start < self.len() {
            self.value = splice_chars(&self.value, start, 1);
        }
        self.collapse(start);
    }

    /// Caret left; with `extend` the selection grows from the anchor
    pub fn move_left(&mut self, extend: bool) {
        if extend {
            self.head = self.head.saturating_sub(1);
        } else if self.has_selection() {
            let (start, _) = self.selection();
            self.collapse(start);
        } else {
            self.collapse(self.head.saturating_sub(1));
        }
    }

    pub fn move_right(&mut self, extend: bool) {
        let len = self.len();
        if extend {
            self.head = (self.head + 1).min(len);
        } else if self.has_selection() {
            let (_, end) = self.selection();
            self.collapse(end);
        } else {
            self.collapse((self.head + 1).min(len));
        }
    }

    /// Caret to the start of the current line
    pub fn move_home(&mut self, extend: bool) {
        let target = self.line_start(self.head);
        self.move_to(target, extend);
    }

    /// Caret to the end of the current line
    pub fn move_end(&mut self, extend: bool) {
        let target = self
            .value
            .chars()
            .enumerate()
            .skip(self.head)
            .find(|&(_, c)| c == '\n')
            .map(|(i, _)| i)
            .unwrap_or_else(|| self.len());
        self.move_to(target, extend);
    }

    fn line_start(&self, offset: usize) -> usize {
        self.value
            .chars()
            .take(offset)
            .enumerate()
            .filter(|&(_, c)| c == '\n')
            .last()
            .map(|(i, _)| i + 1)
            .unwrap_or(0)
    }

    fn move_to(&mut self, offset: usize, extend: bool) {
        if extend {
            self.head = offset;
        } else {
            self.collapse(offset);
        }
    }

    fn collapse(&mut self, offset: usize) {
        let offset = offset.min(self.len());
        self.anchor = offset;
        self.head = offset;
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Styled lines with selection highlight and, when focused, a caret cell
    pub fn styled_lines(&self, theme: &Theme, focused: bool) -> Vec<Line<'static>> {
        let (start, end) = self.selection();
        let show_caret = focused && start == end;
        let caret_style = theme.caret_style();
        let selection_style = theme.selection_style();

        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();

        for (i, c) in self.value.chars().enumerate() {
            let caret_here = show_caret && i == self.head;
            if c == '\n' {
                if caret_here {
                    push_char(&mut spans, ' ', caret_style);
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
                continue;
            }

            let style = if caret_here {
                caret_style
            } else if i >= start && i < end {
                selection_style
            } else {
                Style::default()
            };
            push_char(&mut spans, c, style);
        }

        if show_caret && self.head >= self.len() {
            push_char(&mut spans, ' ', caret_style);
        }
        lines.push(Line::from(spans));
        lines
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let title = if focused {
            " Text "
        } else {
            " Text (click to focus) "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(focused))
            .title(title);

        // Keep the caret line in view
        let visible = block.inner(area).height.max(1) as usize;
        let scroll = self.caret_line().saturating_sub(visible - 1);

        let paragraph = Paragraph::new(self.styled_lines(theme, focused))
            .style(theme.base_style())
            .block(block)
            .scroll((scroll.min(u16::MAX as usize) as u16, 0));

        f.render_widget(paragraph, area);
    }
}

/// Append a char, merging into the previous span when the style matches
fn push_char(spans: &mut Vec<Span<'static>>, c: char, style: Style) {
    match spans.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push(c),
        _ => spans.push(Span::styled(c.to_string(), style)),
    }
}

impl EditTarget for TextField {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
        self.collapse(self.len());
    }

    fn selection(&self) -> (usize, usize) {
        (self.anchor.min(self.head), self.anchor.max(self.head))
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.len();
        let (start, end) = (start.min(len), end.min(len));
        self.anchor = start.min(end);
        self.head = start.max(end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{EditState, Key};
    use ratatui::{backend::TestBackend, Terminal};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn new_field_puts_caret_at_end() {
        let field = TextField::new("hello");
        assert_eq!(field.selection(), (5, 5));
    }

    #[test]
    fn selection_is_clamped_and_ordered() {
        let mut field = TextField::new("abc");
        field.set_selection(9, 9);
        assert_eq!(field.selection(), (3, 3));

        field.set_selection(2, 1);
        assert_eq!(field.selection(), (1, 2));
    }

    #[test]
    fn arrow_right_past_end_is_coerced_by_field() {
        let mut field = TextField::new("abc");
        Key::arrow_right().activate(Some(&mut field));
        assert_eq!(field.selection(), (3, 3));
    }

    #[test]
    fn keyboard_activation_round_trip() {
        let mut field = TextField::new("abc");
        field.set_selection(1, 1);
        Key::delete().activate(Some(&mut field));
        assert_eq!(field.edit_state(), EditState::with_caret("ac", 1));

        Key::new("X").activate(Some(&mut field));
        assert_eq!(field.edit_state(), EditState::with_caret("acX", 3));
    }

    #[test]
    fn insert_replaces_selection() {
        let mut field = TextField::new("hello world");
        field.set_selection(0, 5);
        field.insert("bye");
        assert_eq!(field.value(), "bye world");
        assert_eq!(field.selection(), (3, 3));
    }

    #[test]
    fn insert_handles_multibyte_text() {
        let mut field = TextField::new("a→c");
        field.set_selection(2, 2);
        field.insert("é");
        assert_eq!(field.value(), "a→éc");
        assert_eq!(field.selection(), (3, 3));
    }

    #[test]
    fn native_delete_keys() {
        let mut field = TextField::new("abcd");
        field.set_selection(2, 2);
        field.delete_backward();
        assert_eq!(field.edit_state(), EditState::with_caret("acd", 1));

        field.delete_forward();
        assert_eq!(field.edit_state(), EditState::with_caret("ad", 1));

        field.set_selection(0, 0);
        field.delete_backward();
        assert_eq!(field.value(), "ad");

        field.set_selection(2, 2);
        field.delete_forward();
        assert_eq!(field.value(), "ad");
    }

    #[test]
    fn shift_arrows_extend_selection() {
        let mut field = TextField::new("abcdef");
        field.set_selection(3, 3);
        field.move_left(true);
        field.move_left(true);
        assert_eq!(field.selection(), (1, 3));

        field.move_right(false);
        assert_eq!(field.selection(), (3, 3));

        field.move_right(true);
        assert_eq!(field.selection(), (3, 4));
        field.move_left(false);
        assert_eq!(field.selection(), (3, 3));
    }

    #[test]
    fn home_and_end_are_line_aware() {
        let mut field = TextField::new("ab\ncde\nf");
        field.set_selection(5, 5);
        field.move_home(false);
        assert_eq!(field.selection(), (3, 3));
        field.move_end(false);
        assert_eq!(field.selection(), (6, 6));
        field.move_home(true);
        assert_eq!(field.selection(), (3, 6));
    }

    #[test]
    fn caret_line_counts_newlines_before_caret() {
        let mut field = TextField::new("a\nb\nc");
        assert_eq!(field.caret_line(), 2);
        field.set_selection(1, 1);
        assert_eq!(field.caret_line(), 0);
    }

    #[test]
    fn styled_lines_split_on_newlines_with_trailing_caret() {
        let field = TextField::new("ab\n");
        let lines = field.styled_lines(&Theme::dark(), true);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "ab");
        assert_eq!(line_text(&lines[1]), " ");
    }

    #[test]
    fn unfocused_field_has_no_caret_cell() {
        let field = TextField::new("ab");
        let lines = field.styled_lines(&Theme::dark(), false);
        assert_eq!(line_text(&lines[0]), "ab");
    }

    #[test]
    fn selection_is_highlighted() {
        let theme = Theme::dark();
        let mut field = TextField::new("abcd");
        field.set_selection(1, 3);
        let lines = field.styled_lines(&theme, true);
        let highlighted: Vec<&str> = lines[0]
            .spans
            .iter()
            .filter(|s| s.style == theme.selection_style())
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(highlighted, vec!["bc"]);
    }

    #[test]
    fn render_draws_value_inside_border() {
        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        let field = TextField::new("hi");
        terminal
            .draw(|f| field.render(f, f.area(), &Theme::dark(), true))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((1, 1)).map(|c| c.symbol()), Some("h"));
        assert_eq!(buffer.cell((2, 1)).map(|c| c.symbol()), Some("i"));
    }
}
