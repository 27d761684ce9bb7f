//! Widget lifecycle host.
//!
//! [`MapHost`] owns exactly one widget instance for one container and turns
//! the widget's asynchronous `load`/`error` signals into a single status text.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use orbview::host::{HostState, MapHost};
//! use orbview::widget::{Container, NoopWidgetFactory, WidgetOptions};
//!
//! let container = Container::new("globe", 1280, 720);
//! let mut host = MapHost::new(Arc::new(NoopWidgetFactory), WidgetOptions::default());
//!
//! assert_eq!(host.start(&container), HostState::Initializing);
//! host.drain_events();
//! assert_eq!(host.state(), HostState::Ready);
//! assert_eq!(host.status(), "");
//!
//! host.stop();
//! assert_eq!(container.child_count(), 0);
//! ```

mod map_host;
mod state;

pub use map_host::MapHost;
pub use state::{
    is_cosmetic_asset_error, HostState, ERROR_PREFIX, INIT_FAILED_PREFIX, STATUS_LOADING,
};
