//! Color values and the dark-mode dimming math.
//!
//! Colors are carried as strings so that symbolic, toolkit-resolved names
//! (`SystemHighlight`, `systemMovableModalBackground`) pass through to the
//! host toolkit untouched. Hex values and a small set of named colors can be
//! resolved to channels for arithmetic.
//!
//! # Example
//!
//! ```rust
//! use duotone::Color;
//!
//! let accent = Color::new("#ff8000");
//! assert_eq!(accent.dimmed().unwrap(), Color::new("#aa5500"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Divisor applied to 16-bit channels when deriving the disabled-foreground
/// shade. Empirically tuned; lands at roughly 2/3 of full brightness.
const DIM_DIVISOR: u32 = 384;

/// Named colors the resolver understands without toolkit help.
///
/// `grey4` is the near-black used as the dark-mode background (matches the
/// inactive dark titlebar shade on macOS).
const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("black", (0x00, 0x00, 0x00)),
    ("white", (0xff, 0xff, 0xff)),
    ("blue", (0x00, 0x00, 0xff)),
    ("grey4", (0x0a, 0x0a, 0x0a)),
    ("gray4", (0x0a, 0x0a, 0x0a)),
];

/// Error resolving a color string to channel values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The string is neither a hex value nor a known color name.
    #[error("unrecognized color {0:?}")]
    Unrecognized(String),
}

/// A color specified by hex string or symbolic name.
///
/// # Examples
///
/// ```rust
/// use duotone::Color;
///
/// let hex = Color::new("#ff0000");
/// let named = Color::new("grey4");
/// let symbolic = Color::new("SystemHighlight"); // resolved by the toolkit
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    /// Create a new color from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The raw color string as handed to the toolkit.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse as 8-bit RGB if this is a hex color or known name.
    ///
    /// Symbolic system colors return `None`; only the host toolkit can
    /// resolve those.
    pub fn as_rgb(&self) -> Option<(u8, u8, u8)> {
        let raw = self.0.trim();
        if let Some(s) = raw.strip_prefix('#') {
            if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            if s.len() == 6 {
                let r = u8::from_str_radix(&s[0..2], 16).ok()?;
                let g = u8::from_str_radix(&s[2..4], 16).ok()?;
                let b = u8::from_str_radix(&s[4..6], 16).ok()?;
                return Some((r, g, b));
            }
            if s.len() == 3 {
                let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
                return Some((r, g, b));
            }
            return None;
        }
        let lower = raw.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| *rgb)
    }

    /// Resolve to 16-bit channels, the depth the windowing system reports.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Unrecognized`] when the value is neither hex
    /// nor a known name. Callers surface this untranslated.
    pub fn rgb16(&self) -> Result<(u16, u16, u16), ColorError> {
        let (r, g, b) = self
            .as_rgb()
            .ok_or_else(|| ColorError::Unrecognized(self.0.clone()))?;
        Ok((widen(r), widen(g), widen(b)))
    }

    /// Derive the disabled-foreground shade used in dark mode.
    ///
    /// Each 16-bit channel is divided by the fixed dimming divisor and the
    /// result re-emitted as an 8-bit hex color.
    ///
    /// # Errors
    ///
    /// Propagates [`ColorError`] from channel resolution.
    pub fn dimmed(&self) -> Result<Color, ColorError> {
        let (r, g, b) = self.rgb16()?;
        Ok(Color(format!(
            "#{:02x}{:02x}{:02x}",
            u32::from(r) / DIM_DIVISOR,
            u32::from(g) / DIM_DIVISOR,
            u32::from(b) / DIM_DIVISOR,
        )))
    }

    /// Returns true if this color resolves without toolkit help.
    #[must_use]
    pub fn is_resolvable(&self) -> bool {
        self.as_rgb().is_some()
    }
}

/// Widen an 8-bit channel to the 16-bit range the window system uses.
fn widen(c: u8) -> u16 {
    u16::from(c) * 257
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
