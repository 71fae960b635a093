//! Weak-handle widget registry.
//!
//! Registries never own widgets: entries hold [`Weak`] references and the
//! capability tag snapshotted at registration. Entries whose widget has been
//! dropped are pruned during iteration.

use std::rc::Rc;

use crate::widget::{Capability, WeakWidget, WidgetHandle};

struct Entry {
    /// Identity of the registered handle, kept after the widget dies so
    /// pruning and dedup stay cheap.
    key: usize,
    handle: WeakWidget,
    capability: Capability,
}

fn key_of(widget: &WidgetHandle) -> usize {
    Rc::as_ptr(widget).cast::<()>() as usize
}

/// Set of registered widgets, identity keyed by handle pointer.
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Add a widget, snapshotting its capability. Returns false if the
    /// handle is already registered.
    pub(crate) fn insert(&mut self, widget: &WidgetHandle) -> bool {
        if self.contains(widget) {
            return false;
        }
        self.entries.push(Entry {
            key: key_of(widget),
            handle: Rc::downgrade(widget),
            capability: widget.capability(),
        });
        true
    }

    pub(crate) fn contains(&self, widget: &WidgetHandle) -> bool {
        let key = key_of(widget);
        self.entries.iter().any(|e| e.key == key)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Visit every live widget with its capability, dropping entries whose
    /// widget is gone.
    pub(crate) fn for_each_live(&mut self, mut visit: impl FnMut(&WidgetHandle, Capability)) {
        self.entries.retain(|entry| match entry.handle.upgrade() {
            Some(widget) => {
                visit(&widget, entry.capability);
                true
            }
            None => false,
        });
    }
}
