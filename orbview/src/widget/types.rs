//! Widget-facing types: container, options, signals and the widget traits.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::style::{globe_style, Projection, StyleDocument};

/// Errors raised synchronously while constructing a widget.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WidgetError {
    /// The container cannot host a widget (detached or zero-sized).
    #[error("invalid container")]
    InvalidContainer { id: String },

    /// The container already holds a widget subtree.
    #[error("container '{0}' already hosts a widget")]
    ContainerOccupied(String),

    /// No async runtime is available to drive the widget.
    #[error("no async runtime available: {0}")]
    Runtime(String),
}

#[derive(Debug)]
struct ContainerInner {
    id: String,
    width: u32,
    height: u32,
    /// Id of the widget whose subtree is mounted here.
    child: Option<String>,
}

/// Element a widget renders into.
///
/// Cloning yields another handle to the same element. A container holds at
/// most one widget subtree.
#[derive(Debug, Clone)]
pub struct Container {
    inner: Arc<Mutex<ContainerInner>>,
}

impl Container {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ContainerInner {
                id: id.into(),
                width,
                height,
                child: None,
            })),
        }
    }

    pub fn id(&self) -> String {
        self.inner.lock().id.clone()
    }

    pub fn size(&self) -> (u32, u32) {
        let inner = self.inner.lock();
        (inner.width, inner.height)
    }

    /// Insert the subtree owned by `widget_id`.
    pub fn attach(&self, widget_id: &str) -> Result<(), WidgetError> {
        let mut inner = self.inner.lock();
        if inner.width == 0 || inner.height == 0 {
            return Err(WidgetError::InvalidContainer {
                id: inner.id.clone(),
            });
        }
        if inner.child.is_some() {
            return Err(WidgetError::ContainerOccupied(inner.id.clone()));
        }
        inner.child = Some(widget_id.to_string());
        Ok(())
    }

    /// Remove the subtree owned by `widget_id`. Returns false if it was not mounted.
    pub fn detach(&self, widget_id: &str) -> bool {
        let mut inner = self.inner.lock();
        if inner.child.as_deref() == Some(widget_id) {
            inner.child = None;
            true
        } else {
            false
        }
    }

    /// Id of the mounted widget, if any.
    pub fn child(&self) -> Option<String> {
        self.inner.lock().child.clone()
    }

    pub fn child_count(&self) -> usize {
        usize::from(self.inner.lock().child.is_some())
    }
}

/// Longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// Everything a widget needs at construction besides its container.
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub style: Arc<StyleDocument>,
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    pub projection: Projection,
    pub attribution_control: bool,
    pub antialias: bool,
    pub interactive: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            style: globe_style(),
            center: LngLat::new(0.0, 20.0),
            zoom: 1.5,
            pitch: 0.0,
            projection: Projection::Globe,
            attribution_control: true,
            antialias: true,
            interactive: true,
        }
    }
}

impl WidgetOptions {
    pub fn with_style(mut self, style: Arc<StyleDocument>) -> Self {
        self.style = style;
        self
    }

    pub fn with_center(mut self, center: LngLat) -> Self {
        self.center = center;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }
}

/// Signal kinds a host can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    Error,
}

/// Asynchronous signal emitted by a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Style and initial resources are loaded.
    Load,
    /// Something failed; the message is shown to the user unless cosmetic.
    Error(String),
}

impl WidgetEvent {
    pub fn error(message: impl Into<String>) -> Self {
        WidgetEvent::Error(message.into())
    }

    pub fn kind(&self) -> EventKind {
        match self {
            WidgetEvent::Load => EventKind::Load,
            WidgetEvent::Error(_) => EventKind::Error,
        }
    }
}

impl fmt::Display for WidgetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetEvent::Load => f.write_str("load"),
            WidgetEvent::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

/// Listener end handed to a widget by [`MapWidget::on`].
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<WidgetEvent>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<WidgetEvent>) -> Self {
        Self { tx }
    }

    /// Queue an event for the listener. Returns false once the listener is gone.
    pub fn emit(&self, event: WidgetEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// A live map widget instance.
pub trait MapWidget: Send {
    /// Identifier of this instance (also names its container subtree).
    fn id(&self) -> &str;

    /// Register a listener for one signal kind.
    fn on(&mut self, kind: EventKind, sink: EventSink);

    /// Switch projection. Re-applying the current projection is a no-op.
    fn set_projection(&mut self, projection: Projection);

    /// Tear down: drop listeners, abandon in-flight work, free the container.
    fn remove(&mut self);
}

/// Constructs widgets.
pub trait WidgetFactory: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Construct a widget bound to `container`.
    fn create(
        &self,
        container: &Container,
        options: &WidgetOptions,
    ) -> Result<Box<dyn MapWidget>, WidgetError>;
}
