//! Persisted theme settings.
//!
//! The engine consumes three keys from the application's settings store: the
//! integer theme flag and the two dark-mode color overrides. Absent keys
//! fall back to the documented defaults, so a missing or partial file is
//! never an error.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::color::Color;
use crate::palette::ThemeMode;

/// Default dark-mode accent ("tangerine" in the macOS color picker).
pub const DEFAULT_DARK_ACCENT: &str = "#ff8000";

/// Default dark-mode highlight accent.
pub const DEFAULT_DARK_HIGHLIGHT: &str = "white";

/// Error loading or saving the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings file")]
    Io(#[from] std::io::Error),
    #[error("malformed settings file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode settings")]
    Encode(#[from] toml::ser::Error),
}

/// Persisted theme configuration.
///
/// # Example
///
/// ```rust
/// use duotone::{Settings, ThemeMode};
///
/// let mut settings = Settings::default();
/// assert_eq!(settings.theme_mode(), ThemeMode::Light);
///
/// settings.set_theme_mode(ThemeMode::Dark);
/// assert_eq!(settings.dark_accent().as_str(), "#ff8000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Theme-mode flag: zero selects the system default, nonzero dark.
    #[serde(default)]
    theme: i64,

    /// Dark-mode accent color override.
    #[serde(default = "default_dark_accent")]
    dark_accent: Color,

    /// Dark-mode highlight color override.
    #[serde(default = "default_dark_highlight")]
    dark_highlight: Color,
}

fn default_dark_accent() -> Color {
    Color::new(DEFAULT_DARK_ACCENT)
}

fn default_dark_highlight() -> Color {
    Color::new(DEFAULT_DARK_HIGHLIGHT)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: 0,
            dark_accent: default_dark_accent(),
            dark_highlight: default_dark_highlight(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&raw)?;
        debug!(settings.path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    settings.path = %path.display(),
                    settings.error = %err,
                    "Settings unavailable; using defaults"
                );
                Self::default()
            }
        }
    }

    /// Persist settings to a TOML file, materializing the defaulted values.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when encoding or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw)?;
        debug!(settings.path = %path.display(), "Settings saved");
        Ok(())
    }

    /// The configured theme mode.
    #[must_use]
    pub fn theme_mode(&self) -> ThemeMode {
        ThemeMode::from_flag(self.theme)
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.theme = i64::from(mode.is_dark());
    }

    /// Dark-mode accent color, defaulted when never overridden.
    #[must_use]
    pub fn dark_accent(&self) -> &Color {
        &self.dark_accent
    }

    pub fn set_dark_accent(&mut self, color: Color) {
        self.dark_accent = color;
    }

    /// Dark-mode highlight color, defaulted when never overridden.
    #[must_use]
    pub fn dark_highlight(&self) -> &Color {
        &self.dark_highlight
    }

    pub fn set_dark_highlight(&mut self, color: Color) {
        self.dark_highlight = color;
    }
}
