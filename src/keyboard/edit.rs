//! Caret-aware text editing for key activation
//!
//! Every key kind maps to a pure function over [`EditState`]. The functions
//! never touch a live widget: the caller reads the focused target's state,
//! runs the activation, and writes the result back through [`EditTarget`].
//!
//! Offsets are character offsets (Unicode scalar values), not byte offsets,
//! so labels like `←` splice correctly.

/// Snapshot of an editable target: its text plus the selection range
///
/// `selection_start == selection_end` is a plain caret with no selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditState {
    pub value: String,
    pub selection_start: usize,
    pub selection_end: usize,
}

impl EditState {
    pub fn new(value: impl Into<String>, selection_start: usize, selection_end: usize) -> Self {
        Self {
            value: value.into(),
            selection_start,
            selection_end,
        }
    }

    /// State with a collapsed caret at `caret`
    pub fn with_caret(value: impl Into<String>, caret: usize) -> Self {
        Self::new(value, caret, caret)
    }

    /// State after the host assigns a new value: caret moves to the end
    fn assigned(value: String) -> Self {
        let end = value.chars().count();
        Self::with_caret(value, end)
    }

    pub fn has_selection(&self) -> bool {
        self.selection_start != self.selection_end
    }

    /// Caret position (selection start)
    pub fn caret(&self) -> usize {
        self.selection_start
    }

    /// Length of the value in characters
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }
}

/// An editable element a key can act on
///
/// The text field implements this. Activation receives it as an explicit
/// `Option<&mut dyn EditTarget>`; `None` means nothing holds focus.
pub trait EditTarget {
    fn value(&self) -> &str;

    /// Replace the value. Like a host text control, this puts the caret at
    /// the end of the new value.
    fn set_value(&mut self, value: String);

    /// Current `(selection_start, selection_end)`
    fn selection(&self) -> (usize, usize);

    /// Set the selection. Implementations coerce out-of-range offsets.
    fn set_selection(&mut self, start: usize, end: usize);

    fn edit_state(&self) -> EditState {
        let (start, end) = self.selection();
        EditState::new(self.value(), start, end)
    }

    /// Write an activation result back: value first, then selection
    fn apply(&mut self, state: EditState) {
        let EditState {
            value,
            selection_start,
            selection_end,
        } = state;
        if value != self.value() {
            self.set_value(value);
        }
        self.set_selection(selection_start, selection_end);
    }
}

/// Remove `count` characters starting at character offset `start`
///
/// Out-of-range starts remove nothing; counts past the end are truncated.
pub(crate) fn splice_chars(value: &str, start: usize, count: usize) -> String {
    value
        .chars()
        .enumerate()
        .filter(|(i, _)| *i < start || *i >= start.saturating_add(count))
        .map(|(_, c)| c)
        .collect()
}

/// Byte index of character offset `offset` (clamped to the end)
pub(crate) fn byte_index(value: &str, offset: usize) -> usize {
    value
        .char_indices()
        .nth(offset)
        .map(|(i, _)| i)
        .unwrap_or(value.len())
}

/// Default activation: append the label to the value
pub fn append(state: &EditState, text: &str) -> EditState {
    let mut value = state.value.clone();
    value.push_str(text);
    EditState::assigned(value)
}

pub fn backspace(state: &EditState) -> EditState {
    let start = state.selection_start;
    let end = state.selection_end;

    if start == 0 && !state.has_selection() {
        return state.clone();
    }

    if state.has_selection() {
        let value = splice_chars(&state.value, start, end.saturating_sub(start));
        return EditState::with_caret(value, start);
    }

    let value = splice_chars(&state.value, start - 1, 1);
    EditState::with_caret(value, start.saturating_sub(1))
}

pub fn delete(state: &EditState) -> EditState {
    let start = state.selection_start;
    let end = state.selection_end;

    if end >= state.len() {
        return state.clone();
    }

    let count = if state.has_selection() {
        end.saturating_sub(start)
    } else {
        1
    };
    let value = splice_chars(&state.value, start, count);
    EditState::with_caret(value, start)
}

/// Enter appends a newline regardless of the caret
pub fn enter(state: &EditState) -> EditState {
    append(state, "\n")
}

pub fn arrow_left(state: &EditState) -> EditState {
    let caret = state.selection_start.saturating_sub(1);
    EditState::with_caret(state.value.clone(), caret)
}

/// No upper clamp here: the target coerces the caret when it is applied
pub fn arrow_right(state: &EditState) -> EditState {
    let caret = state.selection_start + 1;
    EditState::with_caret(state.value.clone(), caret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_adds_label_at_end_and_moves_caret() {
        let state = EditState::with_caret("ab", 0);
        let next = append(&state, "Q");
        assert_eq!(next.value, "abQ");
        assert_eq!(next.caret(), 3);
        assert!(!next.has_selection());
    }

    #[test]
    fn append_ignores_selection() {
        let state = EditState::new("hello", 1, 3);
        assert_eq!(append(&state, "!").value, "hello!");
    }

    #[test]
    fn backspace_removes_char_before_caret() {
        let next = backspace(&EditState::with_caret("abc", 1));
        assert_eq!(next, EditState::with_caret("bc", 0));
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let state = EditState::with_caret("abc", 0);
        assert_eq!(backspace(&state), state);
    }

    #[test]
    fn backspace_deletes_selected_range() {
        let next = backspace(&EditState::new("abcd", 1, 3));
        assert_eq!(next, EditState::with_caret("ad", 1));
    }

    #[test]
    fn backspace_deletes_range_starting_at_zero() {
        let next = backspace(&EditState::new("abcd", 0, 2));
        assert_eq!(next, EditState::with_caret("cd", 0));
    }

    #[test]
    fn backspace_at_end() {
        let next = backspace(&EditState::with_caret("abc", 3));
        assert_eq!(next, EditState::with_caret("ab", 2));
    }

    #[test]
    fn delete_removes_char_at_caret() {
        let next = delete(&EditState::with_caret("abc", 1));
        assert_eq!(next, EditState::with_caret("ac", 1));
    }

    #[test]
    fn delete_at_end_is_noop() {
        let state = EditState::with_caret("abc", 3);
        assert_eq!(delete(&state), state);
    }

    #[test]
    fn delete_range_reaching_end_is_noop() {
        let state = EditState::new("abcd", 1, 4);
        assert_eq!(delete(&state), state);
    }

    #[test]
    fn delete_removes_selected_range() {
        let next = delete(&EditState::new("abcd", 0, 2));
        assert_eq!(next, EditState::with_caret("cd", 0));
    }

    #[test]
    fn enter_appends_newline_not_at_caret() {
        let next = enter(&EditState::with_caret("ab", 0));
        assert_eq!(next.value, "ab\n");
        assert_eq!(next.caret(), 3);
    }

    #[test]
    fn arrow_left_clamps_at_zero() {
        let next = arrow_left(&EditState::with_caret("abc", 0));
        assert_eq!(next.caret(), 0);
    }

    #[test]
    fn arrow_left_collapses_selection() {
        let next = arrow_left(&EditState::new("abcdef", 3, 5));
        assert_eq!(next, EditState::with_caret("abcdef", 2));
    }

    #[test]
    fn arrow_right_is_unclamped() {
        let next = arrow_right(&EditState::with_caret("abc", 3));
        assert_eq!(next.caret(), 4);
        assert_eq!(next.value, "abc");
    }

    #[test]
    fn arrow_right_collapses_selection() {
        let next = arrow_right(&EditState::new("abcdef", 2, 5));
        assert_eq!(next, EditState::with_caret("abcdef", 3));
    }

    #[test]
    fn edits_count_characters_not_bytes() {
        let next = backspace(&EditState::with_caret("a←b", 2));
        assert_eq!(next, EditState::with_caret("ab", 1));

        let next = delete(&EditState::with_caret("é→x", 1));
        assert_eq!(next, EditState::with_caret("éx", 1));
    }

    #[test]
    fn splice_out_of_range_removes_nothing() {
        assert_eq!(splice_chars("abc", 5, 1), "abc");
        assert_eq!(splice_chars("abc", 1, 10), "a");
    }

    #[test]
    fn byte_index_handles_multibyte() {
        assert_eq!(byte_index("←a", 1), 3);
        assert_eq!(byte_index("ab", 9), 2);
    }
}
