//! Screen layout: title, text field, keyboard, optional logs, status.
//!
//! Single place that decides how the frame is split, so render code and
//! tests agree on where each panel lives.

use ratatui::layout::{Constraint, Layout, Rect};

const TITLE_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 2;
/// The field always keeps at least one line of text inside its border
const FIELD_MIN_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub field: Rect,
    pub keyboard: Rect,
    pub logs: Option<Rect>,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect, keyboard_height: u16, logs_height: Option<u16>) -> Self {
        let mut constraints = vec![
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(FIELD_MIN_HEIGHT),
            Constraint::Length(keyboard_height),
        ];
        if let Some(height) = logs_height {
            constraints.push(Constraint::Length(height));
        }
        constraints.push(Constraint::Length(STATUS_HEIGHT));

        let chunks = Layout::vertical(constraints).split(area);
        let (logs, status) = match logs_height {
            Some(_) => (Some(chunks[3]), chunks[4]),
            None => (None, chunks[3]),
        };

        Self {
            title: chunks[0],
            field: chunks[1],
            keyboard: chunks[2],
            logs,
            status,
        }
    }
}
