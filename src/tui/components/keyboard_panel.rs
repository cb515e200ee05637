//! Keyboard panel component
//!
//! Draws a [`KeyboardNode`] tree as rows of bordered key cells. Shifted
//! labels sit in the top border like a superscript. Active keys (physically
//! held or pointer-pressed) are filled with the theme's active colors.
//!
//! Rendering returns the screen rect of every drawn key so the app can
//! hit-test pointer events against the last frame.

use crate::keyboard::{KeyId, KeyNode, KeyboardNode, STYLE_SHIFT, STYLE_SPACE};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Rows of a key cell: top border, label, bottom border
pub const KEY_HEIGHT: u16 = 3;
/// Horizontal padding around the label, borders included
const KEY_PADDING: u16 = 4;
/// Extra width for modifier keys tagged `key-shift`
const SHIFT_EXTRA: u16 = 2;
/// Minimum width of the space bar
const SPACE_WIDTH: u16 = 20;
/// Narrowest a key gets when a row is squeezed
const MIN_KEY_WIDTH: u16 = 3;

/// Height needed to draw `rows` rows inside the panel border
pub fn panel_height(rows: usize) -> u16 {
    (rows as u16).saturating_mul(KEY_HEIGHT).saturating_add(2)
}

/// Preferred width of a key from its labels and style tags
pub fn natural_width(key: &KeyNode) -> u16 {
    let label = key.primary.width() as u16;
    let secondary = key.secondary.as_deref().map_or(0, |s| s.width() as u16);
    let mut width = label.max(secondary).max(1) + KEY_PADDING;
    if key.has_style(STYLE_SHIFT) {
        width += SHIFT_EXTRA;
    }
    if key.has_style(STYLE_SPACE) {
        width = width.max(SPACE_WIDTH);
    }
    width
}

/// Scale widths down proportionally when a row does not fit
///
/// The result never sums past `available`, so every key stays on screen.
/// Keys keep `MIN_KEY_WIDTH` while the row allows it; past that the width
/// is split evenly and labels are clipped.
pub fn fit_widths(natural: &[u16], available: u16) -> Vec<u16> {
    let total: u32 = natural.iter().map(|&w| w as u32).sum();
    if total <= available as u32 {
        return natural.to_vec();
    }

    let count = natural.len() as u16;
    if count.saturating_mul(MIN_KEY_WIDTH) > available {
        let (base, extra) = (available / count, available % count);
        return (0..count).map(|i| base + u16::from(i < extra)).collect();
    }

    let mut widths: Vec<u16> = natural
        .iter()
        .map(|&w| ((w as u32 * available as u32) / total) as u16)
        .map(|w| w.max(MIN_KEY_WIDTH))
        .collect();

    // Raising narrow keys to the minimum can overflow; take it from the widest
    let sum: u32 = widths.iter().map(|&w| w as u32).sum();
    for _ in 0..sum.saturating_sub(available as u32) {
        if let Some(widest) = widths.iter_mut().max() {
            *widest -= 1;
        }
    }
    widths
}

/// Draw the keyboard and return the rect of each key that fit on screen
pub fn render(
    f: &mut Frame,
    area: Rect,
    tree: &KeyboardNode,
    theme: &Theme,
    show_secondary: bool,
) -> Vec<(KeyId, Rect)> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(false))
        .title(" Keyboard ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut hits = Vec::with_capacity(tree.key_count());
    for (r, row) in tree.rows.iter().enumerate() {
        let y = inner.y + r as u16 * KEY_HEIGHT;
        if y + KEY_HEIGHT > inner.bottom() {
            break;
        }

        let natural: Vec<u16> = row.keys.iter().map(natural_width).collect();
        let widths = fit_widths(&natural, inner.width);

        let mut x = inner.x;
        for (key, width) in row.keys.iter().zip(widths) {
            if x + width > inner.right() {
                break;
            }
            let rect = Rect::new(x, y, width, KEY_HEIGHT);
            render_key(f, rect, key, theme, show_secondary);
            hits.push((key.id, rect));
            x += width;
        }
    }

    hits
}

fn render_key(f: &mut Frame, area: Rect, key: &KeyNode, theme: &Theme, show_secondary: bool) {
    let active = key.is_active();
    let style = theme.key_style(active);
    let border_style = if active {
        style
    } else {
        Style::default().fg(theme.border)
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(border_style);
    if show_secondary {
        if let Some(secondary) = &key.secondary {
            block = block.title(Span::styled(
                secondary.clone(),
                Style::default().fg(theme.key_secondary),
            ));
        }
    }

    let label = Paragraph::new(key.primary.as_str())
        .alignment(Alignment::Center)
        .style(style)
        .block(block);
    f.render_widget(label, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{Keyboard, PressState};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn draw(tree: &KeyboardNode, width: u16) -> (Terminal<TestBackend>, Vec<(KeyId, Rect)>) {
        let mut terminal = Terminal::new(TestBackend::new(width, panel_height(5))).unwrap();
        let mut hits = Vec::new();
        terminal
            .draw(|f| hits = render(f, f.area(), tree, &Theme::dark(), true))
            .unwrap();
        (terminal, hits)
    }

    #[test]
    fn natural_width_follows_style_tags() {
        let tree = Keyboard::standard().render(&PressState::new());
        assert_eq!(natural_width(&tree.rows[0].keys[1]), 5); // "1"
        assert_eq!(natural_width(&tree.rows[0].keys[13]), 13); // "backspace"
        assert_eq!(natural_width(&tree.rows[3].keys[0]), 11); // "Shift"
        assert_eq!(natural_width(&tree.rows[4].keys[3]), SPACE_WIDTH);
    }

    #[test]
    fn fit_widths_keeps_rows_that_fit() {
        assert_eq!(fit_widths(&[5, 5, 10], 30), vec![5, 5, 10]);
    }

    #[test]
    fn fit_widths_squeezes_wide_rows() {
        let widths = fit_widths(&[10, 10, 20], 20);
        assert_eq!(widths, vec![5, 5, 10]);
        assert_eq!(fit_widths(&[2, 40], 20), vec![MIN_KEY_WIDTH, 17]);
    }

    #[test]
    fn fit_widths_never_exceeds_available() {
        for available in [10, 20, 38, 50] {
            let widths = fit_widths(&[5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 13], available);
            assert_eq!(widths.len(), 14);
            assert!(widths.iter().map(|&w| w as u32).sum::<u32>() <= available as u32);
        }
        assert_eq!(fit_widths(&[5, 5, 5], 7), vec![3, 2, 2]);
    }

    #[test]
    fn every_key_is_drawn_on_a_narrow_terminal() {
        let tree = Keyboard::standard().render(&PressState::new());
        let (_, hits) = draw(&tree, 40);
        assert_eq!(hits.len(), tree.key_count());
        for (id, rect) in &hits {
            assert!(rect.width > 0, "{:?} has no width", id);
            assert!(rect.right() <= 39, "{:?} overflows the panel", id);
        }

        let ids: Vec<KeyId> = hits.iter().map(|(id, _)| *id).collect();
        for id in [KeyId::new(1, 14), KeyId::new(2, 12), KeyId::new(4, 8)] {
            assert!(ids.contains(&id), "{:?} is not clickable", id);
        }
    }

    #[test]
    fn every_key_is_drawn_on_a_wide_terminal() {
        let tree = Keyboard::standard().render(&PressState::new());
        let (_, hits) = draw(&tree, 100);
        assert_eq!(hits.len(), tree.key_count());

        // Rows stack top to bottom, keys run left to right
        for pair in hits.windows(2) {
            let ((a, ra), (b, rb)) = (pair[0], pair[1]);
            if a.row == b.row {
                assert!(ra.right() <= rb.x);
            } else {
                assert!(ra.bottom() <= rb.y);
            }
        }
    }

    #[test]
    fn secondary_label_sits_in_top_border() {
        let tree = Keyboard::standard().render(&PressState::new());
        let (terminal, hits) = draw(&tree, 100);
        let (_, rect) = hits[1]; // "1" with "!"
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.cell((rect.x + 1, rect.y)).map(|c| c.symbol()), Some("!"));
    }

    #[test]
    fn active_key_uses_active_colors() {
        let keyboard = Keyboard::standard();
        let mut press = PressState::new();
        press.physical_down(keyboard.keys_matching("a"), Instant::now());
        let tree = keyboard.render(&press);
        let (terminal, hits) = draw(&tree, 100);

        let (_, rect) = hits
            .iter()
            .copied()
            .find(|(id, _)| *id == KeyId::new(2, 1))
            .expect("A is drawn");
        let buffer = terminal.backend().buffer();
        let cell = buffer
            .cell((rect.x + rect.width / 2, rect.y + 1))
            .expect("cell in bounds");
        assert_eq!(cell.symbol(), "A");
        assert_eq!(cell.bg, Theme::dark().key_active_bg);
    }
}
