//! Integration Tests: theme application across a mock widget toolkit.
//!
//! Exercises the full apply pass against recording mocks: capability-exact
//! styling, window-chrome idempotence, container registration snapshots,
//! alternate-pair exclusivity, minimum-width capture, and live hover
//! palette lookups.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use duotone::{
    Capability, Color, EventHandler, Font, NativeStyle, Placement, Platform, Settings, StyleSlot,
    ThemeManager, ThemeMode, Widget, WidgetHandle, WidgetState, WindowOps,
};
use duotone::{Appearance, ChromeError, WindowStyle, WindowStyleEx};

// ===========================================================================
// Helpers
// ===========================================================================

/// Widget double recording every style write by field name.
struct MockWidget {
    capability: Capability,
    menu_bar: bool,
    children: RefCell<Vec<WidgetHandle>>,
    state: Cell<WidgetState>,
    writes: RefCell<Vec<(&'static str, String)>>,
    placed: Cell<bool>,
    click: RefCell<Option<EventHandler>>,
    enter: RefCell<Option<EventHandler>>,
    leave: RefCell<Option<EventHandler>>,
}

impl MockWidget {
    fn build(capability: Capability, menu_bar: bool) -> Rc<Self> {
        Rc::new(Self {
            capability,
            menu_bar,
            children: RefCell::new(Vec::new()),
            state: Cell::new(WidgetState::Normal),
            writes: RefCell::new(Vec::new()),
            placed: Cell::new(false),
            click: RefCell::new(None),
            enter: RefCell::new(None),
            leave: RefCell::new(None),
        })
    }

    fn new(capability: Capability) -> Rc<Self> {
        Self::build(capability, false)
    }

    fn menu_bar() -> Rc<Self> {
        Self::build(Capability::Full, true)
    }

    /// Field names written, in order.
    fn fields(&self) -> Vec<&'static str> {
        self.writes.borrow().iter().map(|(field, _)| *field).collect()
    }

    /// Last value written to `field`.
    fn last(&self, field: &str) -> Option<String> {
        self.writes
            .borrow()
            .iter()
            .rev()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.clone())
    }

    fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }

    fn fire_enter(&self) {
        let handler = self.enter.borrow().clone();
        handler.expect("enter handler bound")();
    }

    fn fire_leave(&self) {
        let handler = self.leave.borrow().clone();
        handler.expect("leave handler bound")();
    }

    fn fire_click(&self) {
        let handler = self.click.borrow().clone();
        handler.expect("click handler bound")();
    }
}

impl Widget for MockWidget {
    fn capability(&self) -> Capability {
        self.capability
    }

    fn children(&self) -> Vec<WidgetHandle> {
        self.children.borrow().clone()
    }

    fn is_menu_bar(&self) -> bool {
        self.menu_bar
    }

    fn set_foreground(&self, color: &Color) {
        self.writes
            .borrow_mut()
            .push(("foreground", color.to_string()));
    }

    fn set_background(&self, color: &Color) {
        self.writes
            .borrow_mut()
            .push(("background", color.to_string()));
    }

    fn set_active_foreground(&self, color: &Color) {
        self.writes
            .borrow_mut()
            .push(("active_foreground", color.to_string()));
    }

    fn set_active_background(&self, color: &Color) {
        self.writes
            .borrow_mut()
            .push(("active_background", color.to_string()));
    }

    fn set_disabled_foreground(&self, color: &Color) {
        self.writes
            .borrow_mut()
            .push(("disabled_foreground", color.to_string()));
    }

    fn set_font(&self, font: &Font) {
        self.writes.borrow_mut().push(("font", format!("{font:?}")));
    }

    fn state(&self) -> WidgetState {
        self.state.get()
    }

    fn set_state(&self, state: WidgetState) {
        self.state.set(state);
    }

    fn place(&self, _placement: &Placement) {
        self.placed.set(true);
    }

    fn remove_from_layout(&self) {
        self.placed.set(false);
    }

    fn bind_click(&self, handler: EventHandler) {
        *self.click.borrow_mut() = Some(handler);
    }

    fn bind_pointer_enter(&self, handler: EventHandler) {
        *self.enter.borrow_mut() = Some(handler);
    }

    fn bind_pointer_leave(&self, handler: EventHandler) {
        *self.leave.borrow_mut() = Some(handler);
    }
}

/// Root-window double recording window-manager traffic.
struct MockWindow {
    width: Cell<u32>,
    events: RefCell<Vec<String>>,
    menu_attached: Cell<bool>,
}

impl MockWindow {
    fn new(width: u32) -> Self {
        Self {
            width: Cell::new(width),
            events: RefCell::new(Vec::new()),
            menu_attached: Cell::new(false),
        }
    }

    fn chrome_toggles(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.starts_with("override_redirect"))
            .count()
    }
}

impl WindowOps for MockWindow {
    fn width(&self) -> u32 {
        self.width.get()
    }

    fn height(&self) -> u32 {
        400
    }

    fn set_min_size(&self, width: Option<u32>, height: Option<u32>) {
        self.events
            .borrow_mut()
            .push(format!("min_size({width:?},{height:?})"));
    }

    fn set_max_size(&self, width: Option<u32>, height: Option<u32>) {
        self.events
            .borrow_mut()
            .push(format!("max_size({width:?},{height:?})"));
    }

    fn set_override_redirect(&self, on: bool) -> Result<(), ChromeError> {
        self.events
            .borrow_mut()
            .push(format!("override_redirect({on})"));
        Ok(())
    }

    fn set_style_bits(
        &self,
        _style: WindowStyle,
        _ex_style: WindowStyleEx,
    ) -> Result<(), ChromeError> {
        self.events.borrow_mut().push("style_bits".into());
        Ok(())
    }

    fn set_appearance(&self, appearance: Appearance) -> Result<(), ChromeError> {
        self.events
            .borrow_mut()
            .push(format!("appearance({appearance:?})"));
        Ok(())
    }

    fn flush_layout(&self) {
        self.events.borrow_mut().push("flush_layout".into());
    }

    fn hide(&self) {
        self.events.borrow_mut().push("hide".into());
    }

    fn show(&self) {
        self.events.borrow_mut().push("show".into());
    }

    fn wait_visible(&self) -> Result<(), ChromeError> {
        self.events.borrow_mut().push("wait_visible".into());
        Ok(())
    }

    fn set_menu_bar(&self, menu: Option<&WidgetHandle>) {
        self.menu_attached.set(menu.is_some());
        self.events
            .borrow_mut()
            .push(format!("menu_bar({})", menu.is_some()));
    }
}

/// Native style double with recognizable light-mode colors.
struct MockStyle;

impl NativeStyle for MockStyle {
    fn color(&self, slot: StyleSlot) -> Color {
        match slot {
            StyleSlot::Background => Color::new("#ececec"),
            StyleSlot::Foreground => Color::new("#111111"),
            StyleSlot::ActiveBackground => Color::new("#c8c8c8"),
            StyleSlot::ActiveForeground => Color::new("#000000"),
            StyleSlot::DisabledForeground => Color::new("#7f7f7f"),
        }
    }

    fn use_engine(&self, _name: &str) {}

    fn set_base_font(&self, _font: &Font) {}
}

fn manager() -> ThemeManager {
    ThemeManager::with_platform(Platform::X11, Rc::new(MockStyle))
}

fn settings(mode: ThemeMode) -> Settings {
    let mut settings = Settings::default();
    settings.set_theme_mode(mode);
    settings
}

fn sorted(mut fields: Vec<&'static str>) -> Vec<&'static str> {
    fields.sort_unstable();
    fields.dedup();
    fields
}

// ===========================================================================
// Capability-exact styling
// ===========================================================================

#[test]
fn full_widget_receives_all_six_fields() {
    let widget = MockWidget::new(Capability::Full);
    let handle: WidgetHandle = widget.clone();
    let mut mgr = manager();
    mgr.register(&handle);
    mgr.apply(&MockWindow::new(640), &settings(ThemeMode::Dark))
        .unwrap();

    assert_eq!(
        sorted(widget.fields()),
        vec![
            "active_background",
            "active_foreground",
            "background",
            "disabled_foreground",
            "font",
            "foreground",
        ]
    );
}

#[test]
fn color_only_widget_receives_colors_and_font_only() {
    let widget = MockWidget::new(Capability::ColorOnly);
    let handle: WidgetHandle = widget.clone();
    let mut mgr = manager();
    mgr.register(&handle);
    mgr.apply(&MockWindow::new(640), &settings(ThemeMode::Dark))
        .unwrap();

    assert_eq!(
        sorted(widget.fields()),
        vec!["background", "font", "foreground"]
    );
}

#[test]
fn background_only_widget_receives_background_only() {
    let widget = MockWidget::new(Capability::BackgroundOnly);
    let handle: WidgetHandle = widget.clone();
    let mut mgr = manager();
    mgr.register(&handle);
    mgr.apply(&MockWindow::new(640), &settings(ThemeMode::Dark))
        .unwrap();

    assert_eq!(sorted(widget.fields()), vec!["background"]);
}

#[test]
fn bitmap_receives_foreground_and_background_only() {
    let widget = MockWidget::new(Capability::Bitmap);
    let handle: WidgetHandle = widget.clone();
    let mut mgr = manager();
    mgr.register(&handle);
    mgr.apply(&MockWindow::new(640), &settings(ThemeMode::Dark))
        .unwrap();

    assert_eq!(sorted(widget.fields()), vec!["background", "foreground"]);
}

#[test]
fn highlight_widget_gets_accent_over_normal_background() {
    let widget = MockWidget::new(Capability::ColorOnly);
    let handle: WidgetHandle = widget.clone();
    let mut mgr = manager();
    mgr.register_highlight(&handle);
    mgr.apply(&MockWindow::new(640), &settings(ThemeMode::Dark))
        .unwrap();

    assert_eq!(widget.last("foreground").unwrap(), "white");
    assert_eq!(widget.last("background").unwrap(), "grey4");
}

#[test]
fn dark_disabled_foreground_is_dimmed_accent() {
    let widget = MockWidget::new(Capability::Full);
    let handle: WidgetHandle = widget.clone();
    let mut mgr = manager();
    mgr.register(&handle);
    mgr.apply(&MockWindow::new(640), &settings(ThemeMode::Dark))
        .unwrap();

    // Default accent #ff8000 dimmed by the fixed divisor.
    assert_eq!(widget.last("disabled_foreground").unwrap(), "#aa5500");
}

// ===========================================================================
// Window-chrome idempotence and minimum width
// ===========================================================================

#[test]
fn second_apply_with_same_mode_skips_window_manager() {
    let widget = MockWidget::new(Capability::Full);
    let handle: WidgetHandle = widget.clone();
    let window = MockWindow::new(640);
    let mut mgr = manager();
    mgr.register(&handle);

    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    widget.clear_writes();
    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();

    // Recolor ran again, chrome did not.
    assert!(!widget.fields().is_empty());
    assert_eq!(window.chrome_toggles(), 1);
}

#[test]
fn mode_change_reaches_window_manager_again() {
    let window = MockWindow::new(640);
    let mut mgr = manager();

    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    mgr.apply(&window, &settings(ThemeMode::Light)).unwrap();
    mgr.apply(&window, &settings(ThemeMode::Light)).unwrap();

    assert_eq!(window.chrome_toggles(), 2);
    assert_eq!(mgr.active_mode(), Some(ThemeMode::Light));
}

#[test]
fn first_apply_captures_minimum_width_once() {
    let window = MockWindow::new(800);
    let mut mgr = manager();

    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    assert_eq!(mgr.min_width(), Some(800));

    // The window grew; a later mode change must not move the minimum.
    window.width.set(1000);
    mgr.apply(&window, &settings(ThemeMode::Light)).unwrap();
    assert_eq!(mgr.min_width(), Some(800));

    let min_sizes: Vec<String> = window
        .events
        .borrow()
        .iter()
        .filter(|e| e.starts_with("min_size"))
        .cloned()
        .collect();
    assert_eq!(min_sizes, vec!["min_size(Some(800),None)"]);
}

// ===========================================================================
// Container registration snapshots
// ===========================================================================

#[test]
fn children_added_after_registration_are_not_themed() {
    let early = MockWidget::new(Capability::Full);
    let container = MockWidget::new(Capability::BackgroundOnly);
    container
        .children
        .borrow_mut()
        .push(early.clone() as WidgetHandle);

    let container_handle: WidgetHandle = container.clone();
    let mut mgr = manager();
    mgr.register(&container_handle);

    // Added after registration: invisible to the theme until re-registered.
    let late = MockWidget::new(Capability::Full);
    container
        .children
        .borrow_mut()
        .push(late.clone() as WidgetHandle);

    let window = MockWindow::new(640);
    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    assert!(!early.fields().is_empty());
    assert!(late.fields().is_empty());

    mgr.register(&container_handle);
    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    assert!(!late.fields().is_empty());
}

// ===========================================================================
// Alternate pairs
// ===========================================================================

#[test]
fn exactly_one_pair_member_is_placed_after_apply() {
    let light = MockWidget::new(Capability::ColorOnly);
    let dark = MockWidget::new(Capability::ColorOnly);
    let pair = duotone::AlternatePair::new(light.clone(), dark.clone());

    let window = MockWindow::new(640);
    let mut mgr = manager();
    mgr.register_alternate(&pair, Placement::at(0, 0).sticky("ew"));

    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    assert!(!light.placed.get());
    assert!(dark.placed.get());

    mgr.apply(&window, &settings(ThemeMode::Light)).unwrap();
    assert!(light.placed.get());
    assert!(!dark.placed.get());
}

#[test]
fn menu_bar_pair_swaps_native_menu_for_dark_widget() {
    let light_menu = MockWidget::menu_bar();
    let dark_menu = MockWidget::new(Capability::Full);
    let pair = duotone::AlternatePair::new(light_menu.clone(), dark_menu.clone());

    let window = MockWindow::new(640);
    let mut mgr = manager();
    mgr.register_alternate(&pair, Placement::at(0, 0));

    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    assert!(!window.menu_attached.get());
    assert!(dark_menu.placed.get());

    mgr.apply(&window, &settings(ThemeMode::Light)).unwrap();
    assert!(window.menu_attached.get());
    assert!(!dark_menu.placed.get());
}

// ===========================================================================
// Live hover palette
// ===========================================================================

#[test]
fn hover_uses_palette_current_at_event_time() {
    let button = MockWidget::new(Capability::Full);
    let icon = MockWidget::new(Capability::Bitmap);
    let button_handle: WidgetHandle = button.clone();
    let icon_handle: WidgetHandle = icon.clone();

    let window = MockWindow::new(640);
    let mut mgr = manager();
    mgr.register(&button_handle);
    mgr.register(&icon_handle);
    mgr.bind_interaction(&button_handle, Rc::new(|| {}), Some(&icon_handle));

    mgr.apply(&window, &settings(ThemeMode::Dark)).unwrap();
    icon.clear_writes();
    button.fire_enter();
    assert_eq!(icon.last("background").unwrap(), "#ff8000");
    assert_eq!(icon.last("foreground").unwrap(), "grey4");

    // Re-theme without rebinding: the same handler now resolves light
    // colors.
    mgr.apply(&window, &settings(ThemeMode::Light)).unwrap();
    icon.clear_writes();
    button.fire_enter();
    assert_eq!(icon.last("background").unwrap(), "#c8c8c8");
    assert_eq!(icon.last("foreground").unwrap(), "#000000");

    button.fire_leave();
    assert_eq!(icon.last("background").unwrap(), "#ececec");
    assert_eq!(icon.last("foreground").unwrap(), "#111111");
}

#[test]
fn click_binding_invokes_activation_callback() {
    let button = MockWidget::new(Capability::Full);
    let handle: WidgetHandle = button.clone();
    let clicks = Rc::new(Cell::new(0));

    let mgr = manager();
    let counter = Rc::clone(&clicks);
    mgr.bind_interaction(
        &handle,
        Rc::new(move || counter.set(counter.get() + 1)),
        None,
    );

    button.fire_click();
    button.fire_click();
    assert_eq!(clicks.get(), 2);
}

// ===========================================================================
// Dropped widgets
// ===========================================================================

#[test]
fn dropped_widgets_are_skipped_without_error() {
    let keep = MockWidget::new(Capability::Full);
    let keep_handle: WidgetHandle = keep.clone();
    let gone = MockWidget::new(Capability::Full);
    let gone_handle: WidgetHandle = gone;

    let mut mgr = manager();
    mgr.register(&keep_handle);
    mgr.register(&gone_handle);
    drop(gone_handle);

    mgr.apply(&MockWindow::new(640), &settings(ThemeMode::Dark))
        .unwrap();
    assert!(!keep.fields().is_empty());
}
