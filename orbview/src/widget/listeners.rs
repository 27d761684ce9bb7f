//! Listener registry shared between a widget and its background work.

use std::sync::Arc;

use parking_lot::Mutex;

use super::types::{EventKind, EventSink, WidgetEvent};

/// Shared handle to a widget's listeners.
pub(crate) type SharedListeners = Arc<Mutex<Listeners>>;

/// Registered sinks per signal kind.
///
/// Events emitted before both kinds have a listener are held back and flushed
/// in emission order once the second kind registers, so a signal raised while
/// the host is still wiring up listeners is neither lost nor reordered.
#[derive(Debug, Default)]
pub(crate) struct Listeners {
    load: Vec<EventSink>,
    error: Vec<EventSink>,
    held: Vec<WidgetEvent>,
    closed: bool,
}

impl Listeners {
    pub(crate) fn shared() -> SharedListeners {
        Arc::new(Mutex::new(Self::default()))
    }

    pub(crate) fn register(&mut self, kind: EventKind, sink: EventSink) {
        if self.closed {
            return;
        }

        match kind {
            EventKind::Load => self.load.push(sink),
            EventKind::Error => self.error.push(sink),
        }

        if self.is_wired() {
            for event in std::mem::take(&mut self.held) {
                self.deliver(event);
            }
        }
    }

    pub(crate) fn emit(&mut self, event: WidgetEvent) {
        if self.closed {
            return;
        }

        if !self.is_wired() {
            self.held.push(event);
            return;
        }
        self.deliver(event);
    }

    fn is_wired(&self) -> bool {
        !self.load.is_empty() && !self.error.is_empty()
    }

    fn deliver(&self, event: WidgetEvent) {
        let sinks = match event.kind() {
            EventKind::Load => &self.load,
            EventKind::Error => &self.error,
        };
        for sink in sinks {
            sink.emit(event.clone());
        }
    }

    /// Drop every listener; later emits are ignored.
    pub(crate) fn close(&mut self) {
        self.closed = true;
        self.load.clear();
        self.error.clear();
        self.held.clear();
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.load.len() + self.error.len()
    }
}
