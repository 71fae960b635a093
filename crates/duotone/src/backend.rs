//! Toolkit and window-manager seam.
//!
//! This module provides the abstraction layer between the theme engine and
//! the host toolkit:
//!
//! - [`NativeStyle`]: lookups into the platform's base widget style
//! - [`WindowOps`]: geometry, decoration, and visibility calls on the root
//!   window
//! - [`WindowStyle`] / [`WindowStyleEx`]: the style words rewritten on the
//!   Windows-like platform
//!
//! Implementations live in the host application; the engine only holds trait
//! objects.

use bitflags::bitflags;
use thiserror::Error;

use crate::color::Color;
use crate::palette::Font;
use crate::widget::WidgetHandle;

/// Slots of the platform's base widget style consulted in light mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleSlot {
    Background,
    Foreground,
    ActiveBackground,
    ActiveForeground,
    DisabledForeground,
}

/// Read access to the platform's native widget style.
pub trait NativeStyle {
    /// Look up a color from the base widget style.
    fn color(&self, slot: StyleSlot) -> Color;

    /// Switch the underlying style engine. Only the `clam` engine honors the
    /// manual color overrides on the X-like platform.
    fn use_engine(&self, name: &str);

    /// Push a font onto the base widget styles (label, button, entry, ...).
    fn set_base_font(&self, font: &Font);
}

/// OS-level window appearance on the macOS-like platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    /// Standard light appearance.
    Aqua,
    /// Vibrant dark appearance.
    VibrantDark,
}

bitflags! {
    /// Window style word for the Windows-like platform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowStyle: u32 {
        /// Thin border, no caption. Used for the borderless dark look.
        const BORDER = 0x0080_0000;
        /// Caption, sizing border, and buttons of a standard window.
        const OVERLAPPED_WINDOW = 0x00CF_0000;
    }
}

bitflags! {
    /// Extended window style word for the Windows-like platform.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WindowStyleEx: u32 {
        /// Raised edge drawn by the window manager.
        const WINDOW_EDGE = 0x0000_0100;
        /// Forces a taskbar entry for the borderless window.
        const APP_WINDOW = 0x0004_0000;
    }
}

/// Error reported by a window-manager call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChromeError {
    /// The underlying window-manager call failed.
    #[error("window manager call failed: {0}")]
    WindowManager(String),
    /// The window never reported itself visible after a redecorate.
    #[error("timed out waiting for window visibility")]
    VisibilityTimeout,
}

/// Window-manager operations on the application's root window.
///
/// Calls marked platform-specific have no-op defaults so a backend only
/// implements the branch it runs on.
pub trait WindowOps {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Constrain the minimum outer size. `None` leaves an axis unconstrained.
    fn set_min_size(&self, width: Option<u32>, height: Option<u32>);
    /// Constrain the maximum outer size. `None` leaves an axis unconstrained.
    fn set_max_size(&self, width: Option<u32>, height: Option<u32>);

    /// Toggle override-redirect (borderless) mode. Re-decorating destroys
    /// and recreates the top-level under some window managers.
    fn set_override_redirect(&self, on: bool) -> Result<(), ChromeError>;

    /// Rewrite the window style words. Windows-like platform only.
    fn set_style_bits(
        &self,
        _style: WindowStyle,
        _ex_style: WindowStyleEx,
    ) -> Result<(), ChromeError> {
        Ok(())
    }

    /// Set the appearance of every open top-level window. macOS-like
    /// platform only.
    fn set_appearance(&self, _appearance: Appearance) -> Result<(), ChromeError> {
        Ok(())
    }

    /// Run pending layout work synchronously. Sizes and style words
    /// recalculate here.
    fn flush_layout(&self);

    fn hide(&self);
    fn show(&self);

    /// Block until the window manager reports the window drawn.
    fn wait_visible(&self) -> Result<(), ChromeError>;

    /// Attach or detach the native menu bar.
    fn set_menu_bar(&self, menu: Option<&WidgetHandle>);
}
