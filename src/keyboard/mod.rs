// Keyboard module - the virtual keyboard model
//
// The keyboard is an ordered list of rows of keys. It owns no UI state:
// - Rendering produces a plain KeyboardNode tree (see render.rs)
// - Pressed state lives in PressState, owned by the app
// - Physical key events are dispatched through one label index instead of
//   a listener per key

pub mod edit;
pub mod key;
pub mod press;
pub mod render;

pub use edit::{EditState, EditTarget};
pub use key::{Key, KeyId, KeyKind, STYLE_ACTIVE, STYLE_KEY, STYLE_SHIFT, STYLE_SPACE};
pub use press::PressState;
pub use render::{KeyNode, KeyboardNode, RowNode};

use std::collections::HashMap;

/// A row of keys, left to right
pub type Row = Vec<Key>;

pub struct Keyboard {
    rows: Vec<Row>,
    /// Lowercased primary label -> every key carrying that label
    label_index: HashMap<String, Vec<KeyId>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Row>) -> Self {
        let mut label_index: HashMap<String, Vec<KeyId>> = HashMap::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, key) in row.iter().enumerate() {
                label_index
                    .entry(key.label().to_lowercase())
                    .or_default()
                    .push(KeyId::new(r, c));
            }
        }

        Self { rows, label_index }
    }

    /// The fixed five-row layout
    pub fn standard() -> Self {
        Self::new(vec![
            vec![
                Key::shifted("`", "~"),
                Key::shifted("1", "!"),
                Key::shifted("2", "@"),
                Key::shifted("3", "#"),
                Key::shifted("4", "$"),
                Key::shifted("5", "%"),
                Key::shifted("6", "^"),
                Key::shifted("7", "&"),
                Key::shifted("8", "*"),
                Key::shifted("9", "("),
                Key::shifted("0", ")"),
                Key::shifted("-", "_"),
                Key::shifted("=", "+"),
                Key::backspace(),
            ],
            vec![
                Key::new("Tab"),
                Key::new("Q"),
                Key::new("W"),
                Key::new("E"),
                Key::new("R"),
                Key::new("T"),
                Key::new("Y"),
                Key::new("U"),
                Key::new("I"),
                Key::new("O"),
                Key::new("P"),
                Key::new("["),
                Key::new("]"),
                Key::new("\\"),
                Key::delete(),
            ],
            vec![
                Key::new("Caps Lock"),
                Key::new("A"),
                Key::new("S"),
                Key::new("D"),
                Key::new("F"),
                Key::new("G"),
                Key::new("H"),
                Key::new("J"),
                Key::new("K"),
                Key::new("L"),
                Key::new(";"),
                Key::new("."),
                Key::enter(),
            ],
            vec![
                Key::new("Shift").with_style(STYLE_SHIFT),
                Key::new("\\"),
                Key::new("Z"),
                Key::new("X"),
                Key::new("C"),
                Key::new("V"),
                Key::new("B"),
                Key::new("N"),
                Key::new("M"),
                Key::new("."),
                Key::new(","),
                Key::new("/"),
                Key::new("↑"),
                Key::new("Shift").with_style(STYLE_SHIFT),
            ],
            vec![
                Key::new("Ctrl"),
                Key::new("Win"),
                Key::new("Alt"),
                Key::new(" ").with_style(STYLE_SPACE),
                Key::new("Alt"),
                Key::new("Ctrl"),
                Key::arrow_left(),
                Key::new("↓"),
                Key::arrow_right(),
            ],
        ])
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn key(&self, id: KeyId) -> Option<&Key> {
        self.rows.get(id.row)?.get(id.col)
    }

    /// Total number of keys
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Keys whose label matches a physical key identifier (case-insensitive)
    pub fn keys_matching(&self, physical: &str) -> &[KeyId] {
        self.label_index
            .get(&physical.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Build the render tree, tagging held keys as active
    pub fn render(&self, press: &PressState) -> KeyboardNode {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| RowNode {
                keys: row
                    .iter()
                    .enumerate()
                    .map(|(c, key)| {
                        let id = KeyId::new(r, c);
                        let mut styles = key.styles().to_vec();
                        if press.is_pressed(id) {
                            styles.push(STYLE_ACTIVE.to_string());
                        }
                        KeyNode {
                            id,
                            styles,
                            primary: key.label().to_string(),
                            secondary: key.secondary().map(str::to_string),
                        }
                    })
                    .collect(),
            })
            .collect();

        KeyboardNode { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn standard_layout_shape() {
        let keyboard = Keyboard::standard();
        let lens: Vec<usize> = keyboard.rows().iter().map(Vec::len).collect();
        assert_eq!(lens, vec![14, 15, 13, 14, 9]);
        assert_eq!(keyboard.len(), 65);
    }

    #[test]
    fn render_preserves_rows_and_order() {
        let keyboard = Keyboard::standard();
        let tree = keyboard.render(&PressState::new());

        assert_eq!(tree.rows.len(), keyboard.rows().len());
        assert_eq!(tree.key_count(), keyboard.len());
        for (row, node) in keyboard.rows().iter().zip(&tree.rows) {
            let labels: Vec<&str> = row.iter().map(Key::label).collect();
            let rendered: Vec<&str> = node.keys.iter().map(|k| k.primary.as_str()).collect();
            assert_eq!(labels, rendered);
        }
    }

    #[test]
    fn render_carries_secondary_and_styles() {
        let tree = Keyboard::standard().render(&PressState::new());
        let one = &tree.rows[0].keys[1];
        assert_eq!(one.primary, "1");
        assert_eq!(one.secondary.as_deref(), Some("!"));

        let shift = &tree.rows[3].keys[0];
        assert!(shift.has_style(STYLE_KEY));
        assert!(shift.has_style(STYLE_SHIFT));

        let space = &tree.rows[4].keys[3];
        assert_eq!(space.primary, " ");
        assert!(space.has_style(STYLE_SPACE));
    }

    #[test]
    fn custom_rows_render_one_node_per_key() {
        let keyboard = Keyboard::new(vec![
            vec![Key::new("x")],
            vec![],
            vec![Key::new("y"), Key::enter()],
        ]);
        let tree = keyboard.render(&PressState::new());
        assert_eq!(tree.rows.len(), 3);
        assert_eq!(tree.rows[1].keys.len(), 0);
        assert_eq!(tree.rows[2].keys[1].id, KeyId::new(2, 1));
    }

    #[test]
    fn label_lookup_is_case_insensitive() {
        let keyboard = Keyboard::standard();
        assert_eq!(keyboard.keys_matching("a"), &[KeyId::new(2, 1)]);
        assert_eq!(keyboard.keys_matching("A"), &[KeyId::new(2, 1)]);
        assert_eq!(keyboard.keys_matching("BACKSPACE"), &[KeyId::new(0, 13)]);
        assert!(keyboard.keys_matching("F5").is_empty());
    }

    #[test]
    fn duplicate_labels_all_match() {
        let keyboard = Keyboard::standard();
        assert_eq!(
            keyboard.keys_matching("shift"),
            &[KeyId::new(3, 0), KeyId::new(3, 13)]
        );
        assert_eq!(keyboard.keys_matching("\\").len(), 2);
    }

    #[test]
    fn physical_press_toggles_active_tag_regardless_of_case() {
        let keyboard = Keyboard::standard();
        let mut press = PressState::new();

        press.physical_down(keyboard.keys_matching("a"), Instant::now());
        let tree = keyboard.render(&press);
        let active: Vec<&str> = tree.active_keys().map(|k| k.primary.as_str()).collect();
        assert_eq!(active, vec!["A"]);

        press.physical_up(keyboard.keys_matching("A"));
        assert_eq!(keyboard.render(&press).active_keys().count(), 0);
    }

    #[test]
    fn key_lookup_by_id() {
        let keyboard = Keyboard::standard();
        assert_eq!(keyboard.key(KeyId::new(1, 14)).map(Key::kind), Some(KeyKind::Delete));
        assert!(keyboard.key(KeyId::new(9, 0)).is_none());
    }
}
