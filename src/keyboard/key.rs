//! Key widgets
//!
//! A key is a label (plus optional shifted label), a set of style tags, and
//! a [`KeyKind`] that decides what activation does to the focused target.
//! Kinds share rendering and pressed-state handling; only activation differs.

use super::edit::{self, EditState, EditTarget};

/// Base style tag carried by every key
pub const STYLE_KEY: &str = "key";
/// Tag added while a key is held (physically or by the pointer)
pub const STYLE_ACTIVE: &str = "key-active";
/// Wide modifier key
pub const STYLE_SHIFT: &str = "key-shift";
/// Space bar
pub const STYLE_SPACE: &str = "key-space";

/// Position of a key in the keyboard: row index, then index within the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId {
    pub row: usize,
    pub col: usize,
}

impl KeyId {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// What a key does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    /// Appends the key's label
    #[default]
    Plain,
    Backspace,
    Delete,
    Enter,
    ArrowLeft,
    ArrowRight,
}

impl KeyKind {
    /// Run this kind's edit over a snapshot of the target
    pub fn activate(self, label: &str, state: &EditState) -> EditState {
        match self {
            KeyKind::Plain => edit::append(state, label),
            KeyKind::Backspace => edit::backspace(state),
            KeyKind::Delete => edit::delete(state),
            KeyKind::Enter => edit::enter(state),
            KeyKind::ArrowLeft => edit::arrow_left(state),
            KeyKind::ArrowRight => edit::arrow_right(state),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyKind::Plain => "plain",
            KeyKind::Backspace => "backspace",
            KeyKind::Delete => "delete",
            KeyKind::Enter => "enter",
            KeyKind::ArrowLeft => "arrow-left",
            KeyKind::ArrowRight => "arrow-right",
        }
    }
}

/// A single on-screen key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    label: String,
    secondary: Option<String>,
    styles: Vec<String>,
    kind: KeyKind,
}

impl Key {
    /// Plain key that types its label
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_kind(label, KeyKind::Plain)
    }

    /// Plain key with a shifted label shown as a superscript
    pub fn shifted(label: impl Into<String>, secondary: impl Into<String>) -> Self {
        let mut key = Self::new(label);
        key.secondary = Some(secondary.into());
        key
    }

    pub fn with_kind(label: impl Into<String>, kind: KeyKind) -> Self {
        Self {
            label: label.into(),
            secondary: None,
            styles: vec![STYLE_KEY.to_string()],
            kind,
        }
    }

    pub fn backspace() -> Self {
        Self::with_kind("backspace", KeyKind::Backspace)
    }

    pub fn delete() -> Self {
        Self::with_kind("Del", KeyKind::Delete)
    }

    pub fn enter() -> Self {
        Self::with_kind("Enter", KeyKind::Enter)
    }

    pub fn arrow_left() -> Self {
        Self::with_kind("←", KeyKind::ArrowLeft)
    }

    pub fn arrow_right() -> Self {
        Self::with_kind("→", KeyKind::ArrowRight)
    }

    /// Add a style tag (builder). Tags keep insertion order and are unique.
    pub fn with_style(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.styles.contains(&tag) {
            self.styles.push(tag);
        }
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    pub fn has_style(&self, tag: &str) -> bool {
        self.styles.iter().any(|s| s == tag)
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    /// Apply this key to the focused target
    ///
    /// Returns `false` without doing anything when no target is focused.
    pub fn activate(&self, target: Option<&mut dyn EditTarget>) -> bool {
        let Some(target) = target else {
            tracing::debug!(key = %self.label, "activation ignored: nothing focused");
            return false;
        };

        let before = target.edit_state();
        let after = self.kind.activate(&self.label, &before);
        tracing::debug!(
            key = %self.label,
            kind = self.kind.name(),
            caret_before = before.caret(),
            caret_after = after.caret(),
            "key activated"
        );
        target.apply(after);
        true
    }
}
