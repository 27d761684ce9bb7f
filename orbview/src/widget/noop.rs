//! Stand-in widget for platforms that cannot host a real one.
//!
//! Claims the container so mount/unmount bookkeeping stays identical, signals
//! `load` straight away and does nothing else.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::style::Projection;

use super::listeners::{Listeners, SharedListeners};
use super::types::{
    Container, EventKind, EventSink, MapWidget, WidgetError, WidgetEvent, WidgetFactory,
    WidgetOptions,
};

static NEXT_NOOP_ID: AtomicU64 = AtomicU64::new(1);

/// Widget that renders nothing.
pub struct NoopWidget {
    id: String,
    container: Container,
    listeners: SharedListeners,
    projection: Projection,
    removed: bool,
}

impl NoopWidget {
    pub fn new(container: &Container, options: &WidgetOptions) -> Result<Self, WidgetError> {
        let id = format!("noop-{}", NEXT_NOOP_ID.fetch_add(1, Ordering::Relaxed));
        container.attach(&id)?;

        let listeners = Listeners::shared();
        listeners.lock().emit(WidgetEvent::Load);

        tracing::debug!(widget = %id, container = %container.id(), "Noop widget created");

        Ok(Self {
            id,
            container: container.clone(),
            listeners,
            projection: options.projection,
            removed: false,
        })
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }
}

impl MapWidget for NoopWidget {
    fn id(&self) -> &str {
        &self.id
    }

    fn on(&mut self, kind: EventKind, sink: EventSink) {
        self.listeners.lock().register(kind, sink);
    }

    fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        self.listeners.lock().close();
        self.container.detach(&self.id);
        tracing::debug!(widget = %self.id, "Noop widget removed");
    }
}

/// Factory for [`NoopWidget`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWidgetFactory;

impl WidgetFactory for NoopWidgetFactory {
    fn name(&self) -> &str {
        "noop"
    }

    fn create(
        &self,
        container: &Container,
        options: &WidgetOptions,
    ) -> Result<Box<dyn MapWidget>, WidgetError> {
        Ok(Box::new(NoopWidget::new(container, options)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_noop_widget_signals_load_on_registration() {
        let container = Container::new("globe", 640, 480);
        let mut widget = NoopWidget::new(&container, &WidgetOptions::default()).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        widget.on(EventKind::Error, EventSink::new(tx.clone()));
        widget.on(EventKind::Load, EventSink::new(tx));

        assert_eq!(rx.try_recv(), Ok(WidgetEvent::Load));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_noop_widget_frees_container_on_remove() {
        let container = Container::new("globe", 640, 480);
        let mut widget = NoopWidget::new(&container, &WidgetOptions::default()).unwrap();
        assert_eq!(container.child(), Some(widget.id().to_string()));

        widget.remove();
        widget.remove();
        assert_eq!(container.child_count(), 0);
    }

    #[test]
    fn test_noop_factory_rejects_invalid_container() {
        let container = Container::new("globe", 0, 0);
        let result = NoopWidgetFactory.create(&container, &WidgetOptions::default());
        assert!(matches!(result, Err(WidgetError::InvalidContainer { .. })));
    }
}
