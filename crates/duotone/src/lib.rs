#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::use_self)]
#![allow(clippy::uninlined_format_args)]

//! # Duotone
//!
//! Dual-mode (light/dark) theming for desktop widget trees.
//!
//! Duotone applies a visual theme across an application's widgets, toggling
//! colors, fonts, and platform window chrome:
//! - **Registry**: widgets are registered once and re-themed on every apply
//! - **Palette**: per-mode colors resolved from persisted overrides and the
//!   platform's native style
//! - **Capabilities**: each widget receives exactly the style properties it
//!   supports
//! - **Window chrome**: borderless/bordered and OS appearance toggles via a
//!   per-platform strategy
//!
//! The widget toolkit and window manager are reached only through the traits
//! in [`backend`] and [`widget`]; the host application implements those
//! seams and hands the manager `Rc` handles.
//!
//! ## Quick Start
//!
//! ```rust
//! use duotone::{Settings, ThemeMode};
//!
//! let mut settings = Settings::default();
//! settings.set_theme_mode(ThemeMode::Dark);
//!
//! // With a toolkit backend in hand:
//! // let mut theme = ThemeManager::new(native);
//! // theme.register(&close_button);
//! // theme.apply(&root_window, &settings)?;
//! ```
//!
//! Registration and apply run synchronously on the UI thread; handles are
//! `Rc`/`Weak` and the manager never owns a widget.

pub mod backend;
pub mod chrome;
pub mod color;
pub mod manager;
pub mod palette;
mod registry;
pub mod settings;
pub mod widget;

pub use backend::{
    Appearance, ChromeError, NativeStyle, StyleSlot, WindowOps, WindowStyle, WindowStyleEx,
};
pub use chrome::{ChromeStrategy, MacOsChrome, Platform, WindowsChrome, X11Chrome};
pub use color::{Color, ColorError};
pub use manager::{ApplyError, ThemeManager};
pub use palette::{Font, Palette, PaletteError, ThemeMode};
pub use settings::{DEFAULT_DARK_ACCENT, DEFAULT_DARK_HIGHLIGHT, Settings, SettingsError};
pub use widget::{
    AlternatePair, Capability, EventHandler, Placement, WeakWidget, Widget, WidgetHandle,
    WidgetState,
};

/// Common imports for host applications.
pub mod prelude {
    pub use crate::backend::{Appearance, NativeStyle, StyleSlot, WindowOps};
    pub use crate::color::Color;
    pub use crate::manager::ThemeManager;
    pub use crate::palette::{Font, Palette, ThemeMode};
    pub use crate::settings::Settings;
    pub use crate::widget::{
        AlternatePair, Capability, Placement, Widget, WidgetHandle, WidgetState,
    };
}
