//! The theme manager: registration, interaction binding, and the apply pass.
//!
//! [`ThemeManager`] is an explicit context object owned by the application's
//! top-level controller. It tracks registered widgets, resolves the palette
//! on every apply, pushes it onto each widget according to capability, swaps
//! alternate pairs, and drives the platform window-chrome strategy only on an
//! actual mode change.
//!
//! All calls run on the UI thread; handles are `Rc`/`Weak` and nothing here
//! is `Send`.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::backend::{ChromeError, NativeStyle, WindowOps};
use crate::chrome::{ChromeStrategy, Platform};
use crate::palette::{Palette, PaletteError, ThemeMode};
use crate::registry::Registry;
use crate::settings::Settings;
use crate::widget::{
    AlternatePair, Capability, EventHandler, Placement, WeakWidget, WidgetHandle, WidgetState,
};

/// Shared cell holding the most recently resolved palette.
///
/// Interaction handlers read it at event time, so a later apply retroactively
/// changes hover colors without rebinding.
type PaletteCell = Rc<RefCell<Option<Palette>>>;

/// Error from an apply pass.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    Chrome(#[from] ChromeError),
}

struct RegisteredPair {
    light: WeakWidget,
    dark: WeakWidget,
    placement: Placement,
}

/// Theme context for one application.
///
/// One instance lives for the application's lifetime. Callers register
/// widgets as they build the UI and call [`ThemeManager::apply`] whenever
/// the theme setting changes (including once at startup).
pub struct ThemeManager {
    platform: Platform,
    native: Rc<dyn NativeStyle>,
    chrome: Box<dyn ChromeStrategy>,
    active: Option<ThemeMode>,
    min_width: Option<u32>,
    plain: Registry,
    highlight: Registry,
    pairs: Vec<RegisteredPair>,
    current: PaletteCell,
}

impl fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeManager")
            .field("platform", &self.platform)
            .field("active", &self.active)
            .field("min_width", &self.min_width)
            .field("plain", &self.plain.len())
            .field("highlight", &self.highlight.len())
            .field("pairs", &self.pairs.len())
            .finish()
    }
}

impl ThemeManager {
    /// Create a manager for the detected platform.
    pub fn new(native: Rc<dyn NativeStyle>) -> Self {
        Self::with_platform(Platform::detect(), native)
    }

    /// Create a manager for an explicit platform.
    pub fn with_platform(platform: Platform, native: Rc<dyn NativeStyle>) -> Self {
        Self::with_chrome(platform, native, platform.strategy())
    }

    /// Create a manager with an injected chrome strategy.
    pub fn with_chrome(
        platform: Platform,
        native: Rc<dyn NativeStyle>,
        chrome: Box<dyn ChromeStrategy>,
    ) -> Self {
        Self {
            platform,
            native,
            chrome,
            active: None,
            min_width: None,
            plain: Registry::default(),
            highlight: Registry::default(),
            pairs: Vec::new(),
            current: Rc::new(RefCell::new(None)),
        }
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The last-applied mode, or `None` before the first apply.
    #[must_use]
    pub fn active_mode(&self) -> Option<ThemeMode> {
        self.active
    }

    /// Minimum window width captured on the first apply.
    #[must_use]
    pub fn min_width(&self) -> Option<u32> {
        self.min_width
    }

    /// Copy of the most recently resolved palette.
    #[must_use]
    pub fn current_palette(&self) -> Option<Palette> {
        self.current.borrow().clone()
    }

    /// Register a widget for the uniform palette treatment.
    ///
    /// Containers are walked recursively, registering all *current* children
    /// first; children added later must be re-registered.
    pub fn register(&mut self, widget: &WidgetHandle) {
        for child in widget.children() {
            self.register(&child);
        }
        if self.plain.insert(widget) {
            debug!(widget.capability = ?widget.capability(), "Widget registered");
        }
    }

    /// Register a widget for the highlight (accent) treatment.
    ///
    /// Containers are walked per child, so nested containers flatten
    /// correctly.
    pub fn register_highlight(&mut self, widget: &WidgetHandle) {
        for child in widget.children() {
            self.register_highlight(&child);
        }
        if self.highlight.insert(widget) {
            debug!(widget.capability = ?widget.capability(), "Highlight widget registered");
        }
    }

    /// Register a light/dark widget pair occupying one layout slot.
    ///
    /// No recursion and no compatibility validation; the caller guarantees
    /// the variants fit the same slot.
    pub fn register_alternate(&mut self, pair: &AlternatePair, placement: Placement) {
        self.pairs.push(RegisteredPair {
            light: Rc::downgrade(&pair.light),
            dark: Rc::downgrade(&pair.dark),
            placement,
        });
        debug!(pairs.count = self.pairs.len(), "Alternate pair registered");
    }

    /// Wire click and hover handlers so `widget` indicates its active state
    /// with the current palette.
    ///
    /// The hover handlers resolve colors from the shared palette cell when
    /// the pointer event fires, not at bind time: re-applying the theme
    /// changes future hover colors without rebinding. Before the first apply
    /// the cell is empty and icon recoloring is skipped.
    pub fn bind_interaction(
        &self,
        widget: &WidgetHandle,
        on_activate: EventHandler,
        icon: Option<&WidgetHandle>,
    ) {
        widget.bind_click(on_activate);

        let cell = Rc::clone(&self.current);
        let target = Rc::downgrade(widget);
        let icon_ref = icon.map(Rc::downgrade);
        widget.bind_pointer_enter(Rc::new(move || {
            pointer_transition(&target, icon_ref.as_ref(), &cell, true);
        }));

        let cell = Rc::clone(&self.current);
        let target = Rc::downgrade(widget);
        let icon_ref = icon.map(Rc::downgrade);
        widget.bind_pointer_leave(Rc::new(move || {
            pointer_transition(&target, icon_ref.as_ref(), &cell, false);
        }));
    }

    /// Apply the configured theme to every registered widget and, on a mode
    /// change, toggle the window chrome.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyError`] when palette resolution or a window-manager
    /// call fails. The recolor pass itself is infallible.
    pub fn apply(&mut self, root: &dyn WindowOps, settings: &Settings) -> Result<(), ApplyError> {
        let mode = settings.theme_mode();
        let palette = Palette::resolve(mode, self.platform, settings, self.native.as_ref())?;
        *self.current.borrow_mut() = Some(palette.clone());

        self.plain
            .for_each_live(|widget, capability| push_palette(widget, capability, &palette));

        self.highlight.for_each_live(|widget, _| {
            widget.set_foreground(&palette.highlight);
            widget.set_background(&palette.background);
        });

        self.pairs.retain(|pair| swap_pair(pair, mode, root));

        if self.active == Some(mode) {
            // The window manager phase is disruptive; skip it when nothing
            // changed.
            trace!(theme.mode = ?mode, "Mode unchanged; window chrome untouched");
            return Ok(());
        }
        let previous = self.active.replace(mode);
        info!(theme.from = ?previous, theme.to = ?mode, "Theme switched");

        let first_run = self.min_width.is_none();
        if let Some(width) = self.chrome.toggle(root, mode.is_dark(), first_run)? {
            self.min_width = Some(width);
            debug!(window.min_width = width, "Minimum window width captured");
        }
        Ok(())
    }
}

/// Push the palette fields selected by `capability` onto `widget`.
fn push_palette(widget: &WidgetHandle, capability: Capability, palette: &Palette) {
    match capability {
        Capability::Bitmap => {
            widget.set_foreground(&palette.foreground);
            widget.set_background(&palette.background);
        }
        Capability::Full => {
            widget.set_foreground(&palette.foreground);
            widget.set_background(&palette.background);
            widget.set_active_foreground(&palette.active_foreground);
            widget.set_active_background(&palette.active_background);
            widget.set_disabled_foreground(&palette.disabled_foreground);
            widget.set_font(&palette.font);
        }
        Capability::ColorOnly => {
            widget.set_foreground(&palette.foreground);
            widget.set_background(&palette.background);
            widget.set_font(&palette.font);
        }
        Capability::BackgroundOnly => {
            widget.set_background(&palette.background);
        }
    }
}

/// Show the pair member matching `mode`. Returns false when either member
/// is gone and the pair should be dropped.
fn swap_pair(pair: &RegisteredPair, mode: ThemeMode, root: &dyn WindowOps) -> bool {
    let (light, dark) = match (pair.light.upgrade(), pair.dark.upgrade()) {
        (Some(light), Some(dark)) => (light, dark),
        _ => return false,
    };

    if light.is_menu_bar() {
        // The native menu bar has no dark rendering; swap in the
        // dark-rendered menu widget instead.
        if mode.is_dark() {
            root.set_menu_bar(None);
            dark.place(&pair.placement);
        } else {
            root.set_menu_bar(Some(&light));
            dark.remove_from_layout();
        }
    } else {
        let (outgoing, incoming) = if mode.is_dark() {
            (light, dark)
        } else {
            (dark, light)
        };
        outgoing.remove_from_layout();
        incoming.place(&pair.placement);
    }
    true
}

/// Hover transition shared by the enter and leave handlers.
fn pointer_transition(
    target: &WeakWidget,
    icon: Option<&WeakWidget>,
    cell: &PaletteCell,
    entering: bool,
) {
    let Some(widget) = target.upgrade() else {
        return;
    };
    if widget.state() == WidgetState::Disabled {
        return;
    }
    widget.set_state(if entering {
        WidgetState::Active
    } else {
        WidgetState::Normal
    });

    let Some(icon) = icon.and_then(Weak::upgrade) else {
        return;
    };
    let palette = cell.borrow();
    let Some(palette) = palette.as_ref() else {
        return;
    };
    if entering {
        icon.set_foreground(&palette.active_foreground);
        icon.set_background(&palette.active_background);
    } else {
        icon.set_foreground(&palette.foreground);
        icon.set_background(&palette.background);
    }
}
