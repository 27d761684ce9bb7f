//! The map host.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::widget::{
    Container, EventKind, EventSink, MapWidget, WidgetEvent, WidgetFactory, WidgetOptions,
};

use super::state::{
    is_cosmetic_asset_error, HostState, ERROR_PREFIX, INIT_FAILED_PREFIX, STATUS_LOADING,
};

/// Owns at most one widget bound to one container.
///
/// # State Machine
///
/// ```text
/// Uninitialized --start()--> Initializing        (status "Loading globe...")
/// Uninitialized --start() fails--> Error         (status "Initialization Failed: ...")
/// Initializing/Error --load--> Ready             (status cleared, projection re-applied)
/// Initializing/Ready/Error --error(glyph|sprite)--> unchanged
/// Initializing/Ready/Error --error(other)--> Error (status "Error: ...")
/// any --stop()--> Uninitialized
/// ```
///
/// Signals are queued on a channel owned by the host and delivered by
/// [`drain_events`](Self::drain_events) or [`next_event`](Self::next_event)
/// on the caller's event loop. Each started widget gets a fresh channel, so
/// signals from a stopped widget are never delivered.
pub struct MapHost {
    factory: Arc<dyn WidgetFactory>,
    options: WidgetOptions,
    widget: Option<Box<dyn MapWidget>>,
    events: Option<mpsc::UnboundedReceiver<WidgetEvent>>,
    state: HostState,
    status: String,
}

impl std::fmt::Debug for MapHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapHost")
            .field("factory", &self.factory.name())
            .field("widget", &self.widget.as_ref().map(|w| w.id().to_string()))
            .field("state", &self.state)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl MapHost {
    pub fn new(factory: Arc<dyn WidgetFactory>, options: WidgetOptions) -> Self {
        Self {
            factory,
            options,
            widget: None,
            events: None,
            state: HostState::Uninitialized,
            status: String::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> HostState {
        self.state
    }

    /// Text shown to the user; empty when there is nothing to report.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn has_widget(&self) -> bool {
        self.widget.is_some()
    }

    /// Id of the live widget, if any.
    pub fn widget_id(&self) -> Option<&str> {
        self.widget.as_deref().map(|w| w.id())
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    /// Mount: construct the widget into `container` unless one already exists.
    ///
    /// Construction failures never propagate; they land in [`status`](Self::status).
    pub fn start(&mut self, container: &Container) -> HostState {
        if let Some(widget) = &self.widget {
            tracing::debug!(widget = %widget.id(), "Widget already exists, skipping construction");
            return self.state;
        }

        self.state = HostState::Initializing;
        self.status = STATUS_LOADING.to_string();

        match self.factory.create(container, &self.options) {
            Ok(mut widget) => {
                let (tx, rx) = mpsc::unbounded_channel();
                widget.on(EventKind::Load, EventSink::new(tx.clone()));
                widget.on(EventKind::Error, EventSink::new(tx));

                tracing::info!(
                    widget = %widget.id(),
                    factory = self.factory.name(),
                    container = %container.id(),
                    "Widget created"
                );
                self.events = Some(rx);
                self.widget = Some(widget);
            }
            Err(e) => {
                tracing::error!(
                    factory = self.factory.name(),
                    container = %container.id(),
                    error = %e,
                    "Widget construction failed"
                );
                self.state = HostState::Error;
                self.status = format!("{}{}", INIT_FAILED_PREFIX, e);
            }
        }

        self.state
    }

    /// Unmount: remove the widget and clear the reference.
    ///
    /// Safe to call any number of times, including when `start` failed.
    pub fn stop(&mut self) {
        if let Some(mut widget) = self.widget.take() {
            widget.remove();
            tracing::info!(widget = %widget.id(), "Widget removed");
        }
        self.events = None;
        self.state = HostState::Uninitialized;
        self.status.clear();
    }

    /// Apply one widget signal.
    pub fn dispatch(&mut self, event: WidgetEvent) {
        let Some(widget) = self.widget.as_mut() else {
            tracing::debug!(%event, "No widget, ignoring signal");
            return;
        };

        match event {
            WidgetEvent::Load => {
                // Declared projection is not always honored during style load.
                widget.set_projection(self.options.projection);
                self.state = HostState::Ready;
                self.status.clear();
                tracing::info!(widget = %widget.id(), projection = %self.options.projection, "Globe ready");
            }
            WidgetEvent::Error(message) => {
                if is_cosmetic_asset_error(&message) {
                    tracing::warn!(widget = %widget.id(), error = %message, "Ignoring asset error");
                    return;
                }
                tracing::error!(widget = %widget.id(), error = %message, "Widget error");
                self.state = HostState::Error;
                self.status = format!("{}{}", ERROR_PREFIX, message);
            }
        }
    }

    /// Deliver every queued signal without waiting. Returns how many were applied.
    pub fn drain_events(&mut self) -> usize {
        let mut pending = Vec::new();
        if let Some(rx) = self.events.as_mut() {
            while let Ok(event) = rx.try_recv() {
                pending.push(event);
            }
        }

        let count = pending.len();
        for event in pending {
            self.dispatch(event);
        }
        count
    }

    /// Wait for the next signal and apply it.
    ///
    /// Returns the resulting state, or `None` when no widget is live or the
    /// widget dropped its listeners.
    pub async fn next_event(&mut self) -> Option<HostState> {
        let event = self.events.as_mut()?.recv().await?;
        self.dispatch(event);
        Some(self.state)
    }
}

impl Drop for MapHost {
    fn drop(&mut self) {
        self.stop();
    }
}
