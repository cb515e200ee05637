//! Configuration for the keyboard app
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/keytap/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! CLI flags are applied on top by `main`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod keyboard;
mod logging;
mod serialization;


pub use keyboard::KeyboardConfig;
pub use logging::{LogRotation, LoggingConfig};

use keyboard::FileKeyboard;
use logging::FileLogging;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the theme
const THEME_ENV: &str = "KEYTAP_THEME";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "dark", "light", "nord"
    pub theme: String,

    /// Capture the mouse so keys can be clicked
    pub mouse: bool,

    /// Keyboard behavior
    pub keyboard: KeyboardConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse: true,
            keyboard: KeyboardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure; every field is optional and falls back to defaults
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub theme: Option<String>,
    pub mouse: Option<bool>,

    /// Optional [keyboard] section
    pub keyboard: Option<FileKeyboard>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/keytap/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("keytap").join("config.toml"))
    }

    /// Write the default template if no config file exists yet
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        // Config is optional, so failures here are ignored
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }
        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load configuration: env > file > defaults
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::from_file(file, std::env::var(THEME_ENV).ok()))
    }

    /// Parse a config file. A missing file yields defaults; a file that
    /// exists but cannot be read or parsed is an error.
    fn read_file(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }

    pub(crate) fn parse(contents: &str) -> Result<FileConfig> {
        Ok(toml::from_str(contents)?)
    }

    /// Merge a parsed file over defaults, then apply the env override
    pub(crate) fn from_file(file: FileConfig, theme_env: Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            theme: theme_env.or(file.theme).unwrap_or(defaults.theme),
            mouse: file.mouse.unwrap_or(defaults.mouse),
            keyboard: KeyboardConfig::from_file(file.keyboard),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}

/// Print a framed, actionable config error to stderr
pub fn report_error(error: &anyhow::Error) {
    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
    eprintln!("║  CONFIG ERROR - Failed to load configuration file           ║");
    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
    eprintln!("  Error: {:#}\n", error);
    eprintln!("  Tip: Check for:\n");
    eprintln!("    - Missing quotes around string values");
    eprintln!("    - Invalid boolean values (use true/false)");
    eprintln!("    - Typos in section or key names\n");
    eprintln!("  To reset, run `keytap config --reset`.\n");
}
