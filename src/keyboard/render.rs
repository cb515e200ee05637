//! Render tree produced by the keyboard
//!
//! The tree is plain data: a container of rows, each row a list of key nodes
//! with their resolved style tags. The TUI widget draws it; tests inspect it
//! directly.

use super::key::{KeyId, STYLE_ACTIVE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardNode {
    pub rows: Vec<RowNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowNode {
    pub keys: Vec<KeyNode>,
}

/// One clickable key element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyNode {
    pub id: KeyId,
    pub styles: Vec<String>,
    pub primary: String,
    /// Superscript (shifted) label
    pub secondary: Option<String>,
}

impl KeyNode {
    pub fn has_style(&self, tag: &str) -> bool {
        self.styles.iter().any(|s| s == tag)
    }

    pub fn is_active(&self) -> bool {
        self.has_style(STYLE_ACTIVE)
    }
}

impl KeyboardNode {
    /// Total number of key nodes across all rows
    pub fn key_count(&self) -> usize {
        self.rows.iter().map(|r| r.keys.len()).sum()
    }

    /// Iterate key nodes in row-major order
    pub fn keys(&self) -> impl Iterator<Item = &KeyNode> {
        self.rows.iter().flat_map(|r| r.keys.iter())
    }

    pub fn active_keys(&self) -> impl Iterator<Item = &KeyNode> {
        self.keys().filter(|k| k.is_active())
    }
}
