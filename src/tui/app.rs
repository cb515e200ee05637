// TUI application state
//
// Owns the keyboard model, the text field it types into, focus, pressed-key
// state and the hit areas from the last frame. Event handlers in mod.rs
// translate terminal events into the methods here; nothing in this file
// touches the terminal directly.

use super::components::text_field::TextField;
use super::theme::{Theme, ThemeKind};
use crate::config::{Config, KeyboardConfig};
use crate::keyboard::{EditTarget, KeyId, Keyboard, KeyboardNode, PressState};
use crate::logging::LogBuffer;
use ratatui::layout::{Position, Rect};
use std::time::Instant;

/// Which element receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Field,
    None,
}

pub struct App {
    pub keyboard: Keyboard,
    pub field: TextField,
    pub focus: Focus,
    pub press: PressState,

    /// Key rects from the last frame, for pointer hit-testing
    pub key_areas: Vec<(KeyId, Rect)>,
    /// Text field rect from the last frame
    pub field_area: Rect,

    pub settings: KeyboardConfig,
    /// Terminal reports key releases; when false, physical highlights expire
    pub release_events: bool,

    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub log_buffer: LogBuffer,
    pub show_logs: bool,

    /// Label of the last key activated with the pointer
    pub last_activation: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, log_buffer: LogBuffer, initial_text: Option<String>) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme).unwrap_or_else(|| {
            tracing::warn!(theme = %config.theme, "unknown theme, using dark");
            ThemeKind::default()
        });

        Self {
            keyboard: Keyboard::standard(),
            field: TextField::new(initial_text.unwrap_or_default()),
            focus: Focus::Field,
            press: PressState::new(),
            key_areas: Vec::new(),
            field_area: Rect::default(),
            settings: config.keyboard.clone(),
            release_events: false,
            theme_kind,
            theme: theme_kind.theme(),
            log_buffer,
            show_logs: false,
            last_activation: None,
            should_quit: false,
        }
    }

    /// Render tree for the current pressed state
    pub fn keyboard_tree(&self) -> KeyboardNode {
        self.keyboard.render(&self.press)
    }

    pub fn is_focused(&self) -> bool {
        self.focus == Focus::Field
    }

    pub fn focus_field(&mut self) {
        if self.focus != Focus::Field {
            tracing::debug!("text field focused");
        }
        self.focus = Focus::Field;
    }

    pub fn blur(&mut self) {
        if self.focus != Focus::None {
            tracing::debug!("text field blurred");
        }
        self.focus = Focus::None;
    }

    pub fn key_at(&self, column: u16, row: u16) -> Option<KeyId> {
        let pos = Position::new(column, row);
        self.key_areas
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| *id)
    }

    /// Activate a key against the focused target
    pub fn activate(&mut self, id: KeyId) -> bool {
        let Some(key) = self.keyboard.key(id) else {
            return false;
        };
        let target: Option<&mut dyn EditTarget> = match self.focus {
            Focus::Field => Some(&mut self.field),
            Focus::None => None,
        };
        let applied = key.activate(target);
        if applied {
            self.last_activation = Some(key.label().to_string());
        }
        applied
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Pointer pressed. On a key: highlight and activate once, keeping
    /// focus. On the field: focus it. Anywhere else: blur.
    pub fn pointer_down(&mut self, column: u16, row: u16) {
        if let Some(id) = self.key_at(column, row) {
            if self.press.pointer_down(id) {
                self.activate(id);
            }
        } else if self.field_area.contains(Position::new(column, row)) {
            self.focus_field();
        } else {
            self.blur();
        }
    }

    /// Pointer dragged; leaving the held key releases it
    pub fn pointer_drag(&mut self, column: u16, row: u16) {
        if let Some(held) = self.press.pointer() {
            if self.key_at(column, row) != Some(held) {
                self.press.pointer_up();
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.press.pointer_up();
    }

    // ─── Physical keys ───────────────────────────────────────────────────

    /// Physical key down or auto-repeat: light every key with that label
    pub fn physical_down(&mut self, name: &str, now: Instant) {
        if !self.settings.mirror_physical {
            return;
        }
        let ids = self.keyboard.keys_matching(name);
        tracing::trace!(key = name, matches = ids.len(), "physical key down");
        self.press.physical_down(ids, now);
    }

    pub fn physical_up(&mut self, name: &str) {
        let ids = self.keyboard.keys_matching(name);
        tracing::trace!(key = name, matches = ids.len(), "physical key up");
        self.press.physical_up(ids);
    }

    /// Redraw tick: expire physical highlights if releases never arrive
    pub fn tick(&mut self, now: Instant) {
        if !self.release_events {
            self.press.expire(now, self.settings.release_fallback());
        }
    }

    // ─── Shell ───────────────────────────────────────────────────────────

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }

    pub fn next_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = self.theme_kind.theme();
        tracing::info!(theme = self.theme_kind.name(), "theme changed");
    }
}
