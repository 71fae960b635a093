//! Platform detection and window-chrome strategies.
//!
//! Toggling between the bordered light look and the borderless dark look
//! needs a different window-manager call sequence on each platform. Each
//! recognized platform gets a [`ChromeStrategy`] implementing the same
//! `toggle(window, dark, first_run)` contract; the strategy returns the
//! window width to pin as the minimum on the first-ever toggle.

use tracing::debug;

use crate::backend::{Appearance, ChromeError, WindowOps, WindowStyle, WindowStyleEx};

/// Recognized platform classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux-like platforms running an X window manager.
    X11,
    MacOs,
    Windows,
}

impl Platform {
    /// Detect the platform from the build target.
    #[must_use]
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::X11
        }
    }

    /// The chrome strategy for this platform.
    #[must_use]
    pub fn strategy(self) -> Box<dyn ChromeStrategy> {
        match self {
            Self::X11 => Box::new(X11Chrome),
            Self::MacOs => Box::new(MacOsChrome),
            Self::Windows => Box::new(WindowsChrome),
        }
    }
}

/// Window-chrome toggle contract shared by the platform strategies.
pub trait ChromeStrategy {
    /// Switch the window between the bordered light look and the borderless
    /// dark look. On the first-ever toggle (`first_run`), captures and
    /// returns the width to pin as the window's minimum.
    ///
    /// # Errors
    ///
    /// Propagates [`ChromeError`] from the window-manager calls.
    fn toggle(
        &self,
        window: &dyn WindowOps,
        dark: bool,
        first_run: bool,
    ) -> Result<Option<u32>, ChromeError>;
}

/// macOS-like: OS appearance switch, no decoration rebuild.
pub struct MacOsChrome;

impl ChromeStrategy for MacOsChrome {
    fn toggle(
        &self,
        window: &dyn WindowOps,
        dark: bool,
        first_run: bool,
    ) -> Result<Option<u32>, ChromeError> {
        // The main window must exist before the appearance call lands.
        window.flush_layout();
        let appearance = if dark {
            Appearance::VibrantDark
        } else {
            Appearance::Aqua
        };
        window.set_appearance(appearance)?;
        debug!(chrome.dark = dark, "Window appearance set");

        if !first_run {
            return Ok(None);
        }
        let width = window.width();
        let height = window.height();
        // Plain non-resizable flags are ignored here; pin the height via the
        // size constraints instead.
        window.set_min_size(Some(width), Some(height));
        window.set_max_size(None, Some(height));
        Ok(Some(width))
    }
}

/// Windows-like: borderless toggle via the window style words.
pub struct WindowsChrome;

impl ChromeStrategy for WindowsChrome {
    fn toggle(
        &self,
        window: &dyn WindowOps,
        dark: bool,
        first_run: bool,
    ) -> Result<Option<u32>, ChromeError> {
        // May destroy and recreate the top-level under the hood.
        window.set_override_redirect(dark)?;
        // Sizes and style words recalculate here.
        window.flush_layout();
        let (style, ex_style) = if dark {
            (WindowStyle::BORDER, WindowStyleEx::APP_WINDOW)
        } else {
            (WindowStyle::OVERLAPPED_WINDOW, WindowStyleEx::WINDOW_EDGE)
        };
        window.set_style_bits(style, ex_style)?;
        window.show();
        // The main window must be displayed before returning.
        window.wait_visible()?;
        debug!(chrome.dark = dark, chrome.style = ?style, "Window restyled");

        if !first_run {
            return Ok(None);
        }
        let width = window.width();
        window.set_min_size(Some(width), None);
        Ok(Some(width))
    }
}

/// X-like: hide and re-show so the window manager re-decorates.
pub struct X11Chrome;

impl ChromeStrategy for X11Chrome {
    fn toggle(
        &self,
        window: &dyn WindowOps,
        dark: bool,
        first_run: bool,
    ) -> Result<Option<u32>, ChromeError> {
        window.set_override_redirect(dark)?;
        window.hide();
        // Size recalculates here.
        window.flush_layout();
        window.show();
        // The main window must be displayed before returning.
        window.wait_visible()?;
        debug!(chrome.dark = dark, "Window redecorated");

        if !first_run {
            return Ok(None);
        }
        let width = window.width();
        window.set_min_size(Some(width), None);
        Ok(Some(width))
    }
}
