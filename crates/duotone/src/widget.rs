//! Widget handles and the toolkit-facing widget trait.
//!
//! The theme engine never talks to a concrete toolkit. Host applications
//! implement [`Widget`] for their toolkit's widget wrappers and hand the
//! manager `Rc` handles; the manager keeps only [`Weak`] references and
//! restricts itself to the style properties declared by each widget's
//! [`Capability`].

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::palette::Font;

/// Shared handle to a toolkit widget.
pub type WidgetHandle = Rc<dyn Widget>;

/// Non-owning handle held by the registries and event closures.
pub type WeakWidget = Weak<dyn Widget>;

/// Callback invoked from toolkit event dispatch.
pub type EventHandler = Rc<dyn Fn()>;

/// The subset of style properties a widget supports.
///
/// Assigned when the widget is registered; the applicator pushes exactly the
/// palette fields the tag declares and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Foreground, background, active pair, disabled foreground, and font
    /// (push-buttons, labels, menus).
    Full,
    /// Foreground, background, and font, with no active/disabled states.
    ColorOnly,
    /// Background only (plain containers).
    BackgroundOnly,
    /// Bitmap image handles: foreground and background only.
    Bitmap,
}

/// Interaction state of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    Active,
    Disabled,
}

/// Saved layout-slot options used when an alternate-pair member is placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: u16,
    pub column: u16,
    pub column_span: u16,
    /// Edges the widget stretches to, in toolkit terms (e.g. `"nsew"`).
    pub sticky: String,
    pub pad_x: u16,
    pub pad_y: u16,
}

impl Placement {
    /// Placement at the given grid cell with no stretching or padding.
    pub fn at(row: u16, column: u16) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    /// Sets the number of columns the slot spans.
    #[must_use]
    pub fn column_span(mut self, span: u16) -> Self {
        self.column_span = span;
        self
    }

    /// Sets the edges the widget stretches to.
    #[must_use]
    pub fn sticky(mut self, edges: impl Into<String>) -> Self {
        self.sticky = edges.into();
        self
    }

    /// Sets horizontal and vertical padding.
    #[must_use]
    pub fn padding(mut self, pad_x: u16, pad_y: u16) -> Self {
        self.pad_x = pad_x;
        self.pad_y = pad_y;
        self
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            column_span: 1,
            sticky: String::new(),
            pad_x: 0,
            pad_y: 0,
        }
    }
}

/// Two widget variants occupying the same logical layout slot.
///
/// The light variant is shown in light mode, the dark variant in dark mode;
/// at most one is placed at a time.
#[derive(Clone)]
pub struct AlternatePair {
    pub light: WidgetHandle,
    pub dark: WidgetHandle,
}

impl AlternatePair {
    pub fn new(light: WidgetHandle, dark: WidgetHandle) -> Self {
        Self { light, dark }
    }
}

/// Toolkit seam for a single widget.
///
/// Style setters are synchronous writes onto the underlying toolkit object.
/// Setters outside the widget's [`Capability`] are never called by the
/// engine, so partial widgets can leave the defaults in place.
pub trait Widget {
    /// The style properties this widget supports.
    fn capability(&self) -> Capability;

    /// Current children, for containers. Snapshotted at registration time;
    /// children added later must be re-registered by the caller.
    fn children(&self) -> Vec<WidgetHandle> {
        Vec::new()
    }

    /// True for the native menu-bar widget of an alternate pair.
    fn is_menu_bar(&self) -> bool {
        false
    }

    fn set_foreground(&self, color: &Color);
    fn set_background(&self, color: &Color);

    fn set_active_foreground(&self, _color: &Color) {}
    fn set_active_background(&self, _color: &Color) {}
    fn set_disabled_foreground(&self, _color: &Color) {}
    fn set_font(&self, _font: &Font) {}

    fn state(&self) -> WidgetState {
        WidgetState::Normal
    }
    fn set_state(&self, _state: WidgetState) {}

    /// Place this widget into its layout slot.
    fn place(&self, _placement: &Placement) {}
    /// Remove this widget from the layout, keeping its slot options.
    fn remove_from_layout(&self) {}

    fn bind_click(&self, _handler: EventHandler) {}
    fn bind_pointer_enter(&self, _handler: EventHandler) {}
    fn bind_pointer_leave(&self, _handler: EventHandler) {}
}
