//! Orbview - a stylized 3D globe for an embedded map widget
//!
//! This library provides the static globe style document and the host that
//! owns the lifecycle of one map widget bound to one container.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Arc<StyleDocument>   ┌──────────────┐   create()   ┌────────────┐
//! │ style::globe │ ─────────────────────► │   MapHost    │ ───────────► │ MapWidget  │
//! └──────────────┘                        │  (host)      │ ◄─────────── │ (widget)   │
//!                                         └──────────────┘  load/error  └────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use orbview::host::MapHost;
//! use orbview::widget::{select_factory, Capabilities, Container, WidgetOptions};
//!
//! let factory = select_factory(&Capabilities::detect());
//! let mut host = MapHost::new(factory, WidgetOptions::default());
//! host.start(&Container::new("globe", 1280, 720));
//! // ... deliver widget signals on the event loop
//! host.drain_events();
//! host.stop();
//! ```

pub mod config;
pub mod fetch;
pub mod host;
pub mod logging;
pub mod style;
pub mod widget;
