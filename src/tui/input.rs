// Physical key translation and release reporting
//
// Terminal key events are turned into physical identifiers modeled on the
// names browsers use for keyboard events ("a", "Backspace", "ArrowLeft",
// "Shift" ...). The keyboard matches these against key labels
// case-insensitively.
//
// Key releases are only reported by terminals that speak the kitty keyboard
// protocol. When that is unavailable the app falls back to timed expiry.

use crossterm::event::{
    KeyCode, KeyEventState, KeyModifiers, KeyboardEnhancementFlags, ModifierKeyCode,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use std::io::Write;

/// Physical identifier for a terminal key code, if it has one
pub fn physical_key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Enter => "Enter",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Esc => "Escape",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Insert => "Insert",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::F(n) => return Some(format!("F{}", n)),
        KeyCode::Modifier(modifier) => modifier_name(modifier),
        _ => return None,
    };
    Some(name.to_string())
}

fn modifier_name(modifier: ModifierKeyCode) -> &'static str {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "Shift",
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "Control",
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "Alt",
        ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper => "Meta",
        ModifierKeyCode::LeftMeta | ModifierKeyCode::RightMeta => "Meta",
        ModifierKeyCode::LeftHyper | ModifierKeyCode::RightHyper => "Hyper",
        ModifierKeyCode::IsoLevel3Shift | ModifierKeyCode::IsoLevel5Shift => "AltGraph",
    }
}

/// Base character -> the character Shift produces on a US layout
const SHIFTED: &[(char, char)] = &[
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// Character a key event types into the field
///
/// In kitty mode some terminals report the unshifted base key plus the
/// SHIFT modifier, and Caps Lock only as key state. Characters already
/// shifted by the terminal pass through unchanged.
pub fn typed_char(c: char, modifiers: KeyModifiers, state: KeyEventState) -> char {
    let shift = modifiers.contains(KeyModifiers::SHIFT);

    if c.is_ascii_alphabetic() {
        let caps = state.contains(KeyEventState::CAPS_LOCK);
        return if shift != caps {
            c.to_ascii_uppercase()
        } else if caps {
            c.to_ascii_lowercase()
        } else {
            c
        };
    }

    if shift {
        if let Some(&(_, shifted)) = SHIFTED.iter().find(|(base, _)| *base == c) {
            return shifted;
        }
    }
    c
}

/// Ask the terminal to report press/repeat/release and bare modifier keys.
/// Returns whether release events will arrive.
pub fn enable_release_reporting<W: Write>(out: &mut W) -> bool {
    match terminal::supports_keyboard_enhancement() {
        Ok(true) => execute!(
            out,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
            )
        )
        .is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_keep_their_case() {
        assert_eq!(physical_key_name(KeyCode::Char('a')).as_deref(), Some("a"));
        assert_eq!(physical_key_name(KeyCode::Char('A')).as_deref(), Some("A"));
        assert_eq!(physical_key_name(KeyCode::Char(' ')).as_deref(), Some(" "));
    }

    #[test]
    fn named_keys_use_event_names() {
        assert_eq!(
            physical_key_name(KeyCode::Backspace).as_deref(),
            Some("Backspace")
        );
        assert_eq!(physical_key_name(KeyCode::Left).as_deref(), Some("ArrowLeft"));
        assert_eq!(physical_key_name(KeyCode::F(5)).as_deref(), Some("F5"));
        assert_eq!(
            physical_key_name(KeyCode::Modifier(ModifierKeyCode::RightShift)).as_deref(),
            Some("Shift")
        );
        assert_eq!(physical_key_name(KeyCode::Null), None);
    }

    #[test]
    fn shift_maps_base_symbols() {
        let shift = KeyModifiers::SHIFT;
        let none = KeyEventState::NONE;
        assert_eq!(typed_char('1', shift, none), '!');
        assert_eq!(typed_char('/', shift, none), '?');
        assert_eq!(typed_char('\'', shift, none), '"');
        assert_eq!(typed_char('1', KeyModifiers::NONE, none), '1');
        // Already shifted by the terminal
        assert_eq!(typed_char('!', shift, none), '!');
    }

    #[test]
    fn caps_lock_and_shift_decide_letter_case() {
        let caps = KeyEventState::CAPS_LOCK;
        let none = KeyEventState::NONE;
        assert_eq!(typed_char('a', KeyModifiers::NONE, caps), 'A');
        assert_eq!(typed_char('a', KeyModifiers::SHIFT, caps), 'a');
        assert_eq!(typed_char('a', KeyModifiers::SHIFT, none), 'A');
        assert_eq!(typed_char('A', KeyModifiers::SHIFT, none), 'A');
        assert_eq!(typed_char('a', KeyModifiers::NONE, none), 'a');
        // Caps Lock leaves digits alone
        assert_eq!(typed_char('1', KeyModifiers::NONE, caps), '1');
    }
}
