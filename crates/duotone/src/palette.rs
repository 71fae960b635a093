//! Theme modes and palette resolution.
//!
//! A [`Palette`] is the transient record of colors and font for one theme
//! mode. It is recomputed on every apply pass: dark mode is built from the
//! persisted accent overrides around a fixed near-black background, light
//! mode from the platform's native style defaults with per-platform
//! corrections.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::backend::{NativeStyle, StyleSlot};
use crate::chrome::Platform;
use crate::color::{Color, ColorError};
use crate::settings::Settings;

/// Background of the dark palette. Matches the inactive dark titlebar shade
/// on macOS.
const DARK_BACKGROUND: &str = "grey4";

/// Highlight used in light mode.
const LIGHT_HIGHLIGHT: &str = "blue";

/// Translucent modal background the macOS toolkit resolves natively.
const MACOS_MODAL_BACKGROUND: &str = "systemMovableModalBackground";

/// System menu highlight pair on the Windows-like platform.
const WINDOWS_ACTIVE_BACKGROUND: &str = "SystemHighlight";
const WINDOWS_ACTIVE_FOREGROUND: &str = "SystemHighlightText";

/// Style engine switched to on the X-like platform; the only engine that
/// honors the manual color overrides.
const X11_STYLE_ENGINE: &str = "clam";

/// Fixed label size worked around on macOS, where the default font spacing
/// renders badly.
const MACOS_BASE_FONT_SIZE: u16 = 13;

/// Flag selecting dark vs default appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    /// Interpret the persisted integer flag: zero is light, anything else
    /// dark.
    #[must_use]
    pub fn from_flag(flag: i64) -> Self {
        if flag == 0 { Self::Light } else { Self::Dark }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Font pushed onto themed widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Font {
    /// The platform's default UI font at its default size.
    SystemDefault,
    /// The platform's default UI font at a fixed point size.
    SystemSized(u16),
}

impl Default for Font {
    fn default() -> Self {
        Self::SystemDefault
    }
}

/// Error resolving a palette.
///
/// Malformed persisted color values surface the color module's error
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// The resolved set of colors and font for one theme mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub active_background: Color,
    pub active_foreground: Color,
    pub disabled_foreground: Color,
    pub highlight: Color,
    pub font: Font,
}

impl Palette {
    /// Resolve the palette for `mode` on `platform`.
    ///
    /// Consults the persisted overrides for the dark accent colors and the
    /// native style for the light defaults. On the X-like platform the
    /// native style engine is switched to `clam` regardless of mode.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError`] when a persisted color override cannot be
    /// resolved to channels for the dimming derivation.
    pub fn resolve(
        mode: ThemeMode,
        platform: Platform,
        settings: &Settings,
        native: &dyn NativeStyle,
    ) -> Result<Self, PaletteError> {
        let mut font = Font::SystemDefault;
        match platform {
            Platform::X11 => native.use_engine(X11_STYLE_ENGINE),
            Platform::MacOs => {
                font = Font::SystemSized(MACOS_BASE_FONT_SIZE);
                native.set_base_font(&font);
            }
            Platform::Windows => {}
        }

        let palette = if mode.is_dark() {
            let accent = settings.dark_accent().clone();
            let disabled = accent.dimmed()?;
            Self {
                background: Color::new(DARK_BACKGROUND),
                foreground: accent.clone(),
                active_background: accent,
                active_foreground: Color::new(DARK_BACKGROUND),
                disabled_foreground: disabled,
                highlight: settings.dark_highlight().clone(),
                font,
            }
        } else {
            let mut palette = Self {
                background: native.color(StyleSlot::Background),
                foreground: native.color(StyleSlot::Foreground),
                active_background: native.color(StyleSlot::ActiveBackground),
                active_foreground: native.color(StyleSlot::ActiveForeground),
                disabled_foreground: native.color(StyleSlot::DisabledForeground),
                highlight: Color::new(LIGHT_HIGHLIGHT),
                font,
            };
            match platform {
                Platform::MacOs => {
                    palette.background = Color::new(MACOS_MODAL_BACKGROUND);
                }
                Platform::Windows => {
                    // Menus render with the system highlight pair.
                    palette.active_background = Color::new(WINDOWS_ACTIVE_BACKGROUND);
                    palette.active_foreground = Color::new(WINDOWS_ACTIVE_FOREGROUND);
                }
                Platform::X11 => {}
            }
            palette
        };

        debug!(
            palette.mode = ?mode,
            palette.background = %palette.background,
            palette.foreground = %palette.foreground,
            "Palette resolved"
        );
        trace!(?palette, "Palette detail");
        Ok(palette)
    }
}
