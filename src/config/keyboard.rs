//! Keyboard behavior configuration

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct KeyboardConfig {
    /// Highlight rendered keys while the matching physical key is held
    pub mirror_physical: bool,

    /// How long a physical highlight lasts on terminals that never report
    /// key releases
    pub release_fallback_ms: u64,

    /// Draw shifted labels in the key's top border
    pub show_secondary: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            mirror_physical: true,
            release_fallback_ms: 150,
            show_secondary: true,
        }
    }
}

impl KeyboardConfig {
    pub fn release_fallback(&self) -> Duration {
        Duration::from_millis(self.release_fallback_ms)
    }

    pub fn from_file(file: Option<FileKeyboard>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            mirror_physical: file.mirror_physical.unwrap_or(defaults.mirror_physical),
            release_fallback_ms: file
                .release_fallback_ms
                .unwrap_or(defaults.release_fallback_ms),
            show_secondary: file.show_secondary.unwrap_or(defaults.show_secondary),
        }
    }
}

/// Keyboard settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileKeyboard {
    pub mirror_physical: Option<bool>,
    pub release_fallback_ms: Option<u64>,
    pub show_secondary: Option<bool>,
}
