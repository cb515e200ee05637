// Components module - UI building blocks
//
// Shell components are rendered around the main content:
// - Title bar: app name, focus state, theme
// - Status bar: caret, length, last key, hints
// - Logs panel: captured tracing entries (toggle)
//
// Content components:
// - Text field: the host input the keyboard edits
// - Keyboard panel: the clickable key grid

pub mod keyboard_panel;
pub mod logs_panel;
pub mod status_bar;
pub mod text_field;
pub mod title_bar;
