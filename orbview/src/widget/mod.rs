//! Map widget abstraction.
//!
//! The host depends only on the [`MapWidget`] and [`WidgetFactory`] traits:
//! construction with a container and [`WidgetOptions`], `on(kind, sink)` for
//! the `load` and `error` signals, `set_projection`, and `remove`.
//!
//! Two widgets ship with the crate:
//!
//! - [`HeadlessWidget`] loads the style and its remote resources without
//!   drawing, and reports through the same signals a rendering widget uses.
//! - [`NoopWidget`] is the stand-in chosen by [`select_factory`] when the
//!   platform cannot host a real widget.

mod capabilities;
mod headless;
mod listeners;
mod noop;
mod types;

pub use capabilities::{select_factory, Capabilities, OFFLINE_ENV};
pub use headless::{HeadlessWidget, HeadlessWidgetFactory};
pub use noop::{NoopWidget, NoopWidgetFactory};
pub use types::{
    Container, EventKind, EventSink, LngLat, MapWidget, WidgetError, WidgetEvent, WidgetFactory,
    WidgetOptions,
};
