//! Config serialization to TOML
//!
//! Single source of truth for the config file format.

use super::Config;

impl Config {
    /// Render this config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# keytap configuration
# Precedence: environment (KEYTAP_THEME) > this file > built-in defaults

# Color theme: "dark", "light", "nord"
theme = "{theme}"

# Capture the mouse so rendered keys can be clicked
mouse = {mouse}

[keyboard]
# Highlight rendered keys while the matching physical key is held
mirror_physical = {mirror_physical}
# Highlight duration when the terminal does not report key releases
release_fallback_ms = {release_fallback_ms}
# Show shifted labels above the primary label
show_secondary = {show_secondary}

[logging]
# trace, debug, info, warn, error (RUST_LOG overrides this)
level = "{level}"
# Also write JSON logs to rolling files
file_enabled = {file_enabled}
file_dir = {file_dir:?}
# hourly, daily, never
file_rotation = "{file_rotation}"
file_prefix = "{file_prefix}"
"#,
            theme = self.theme,
            mouse = self.mouse,
            mirror_physical = self.keyboard.mirror_physical,
            release_fallback_ms = self.keyboard.release_fallback_ms,
            show_secondary = self.keyboard.show_secondary,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display().to_string(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}
