//! Platform capability check.
//!
//! Decides once, at the call site, whether the real widget can be hosted or
//! the no-op stand-in should be used instead.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::fetch::ReqwestClient;

use super::headless::HeadlessWidgetFactory;
use super::noop::NoopWidgetFactory;
use super::types::WidgetFactory;

/// Environment variable that forces the no-op widget when set.
pub const OFFLINE_ENV: &str = "ORBVIEW_OFFLINE";

/// What the current platform can do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// A tokio runtime is available to drive widget work.
    pub async_runtime: bool,
    /// Network access is allowed.
    pub network: bool,
}

impl Capabilities {
    /// Probe the current thread and environment.
    pub fn detect() -> Self {
        Self {
            async_runtime: Handle::try_current().is_ok(),
            network: std::env::var_os(OFFLINE_ENV).is_none(),
        }
    }

    /// Whether a real widget can be constructed.
    pub fn can_host_widget(&self) -> bool {
        self.async_runtime && self.network
    }
}

/// Pick the widget factory for these capabilities.
///
/// Falls back to [`NoopWidgetFactory`] when the platform cannot host a real
/// widget or the HTTP client cannot be built.
pub fn select_factory(capabilities: &Capabilities) -> Arc<dyn WidgetFactory> {
    if !capabilities.can_host_widget() {
        tracing::info!(?capabilities, "Using no-op widget");
        return Arc::new(NoopWidgetFactory);
    }

    match ReqwestClient::new() {
        Ok(client) => Arc::new(HeadlessWidgetFactory::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "HTTP client unavailable, using no-op widget");
            Arc::new(NoopWidgetFactory)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_runtime_outside_tokio() {
        let caps = Capabilities::detect();
        assert!(!caps.async_runtime);
        assert!(!caps.can_host_widget());
    }

    #[tokio::test]
    async fn test_runtime_detected_inside_tokio() {
        assert!(Capabilities::detect().async_runtime);
    }

    #[test]
    fn test_select_noop_without_network() {
        let caps = Capabilities {
            async_runtime: true,
            network: false,
        };
        assert_eq!(select_factory(&caps).name(), "noop");
    }

    #[test]
    fn test_select_headless_when_capable() {
        let caps = Capabilities {
            async_runtime: true,
            network: true,
        };
        assert_eq!(select_factory(&caps).name(), "headless");
    }
}
