//! Host lifecycle states and status text.

/// Status text while the widget is being created and loading.
pub const STATUS_LOADING: &str = "Loading globe...";

/// Prefix for construction failures.
pub const INIT_FAILED_PREFIX: &str = "Initialization Failed: ";

/// Prefix for fatal widget errors.
pub const ERROR_PREFIX: &str = "Error: ";

/// Lifecycle state of a [`MapHost`](super::MapHost).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    /// No widget; nothing started (or stopped again).
    Uninitialized,
    /// Widget constructed, waiting for `load`.
    Initializing,
    /// Widget loaded.
    Ready,
    /// Construction failed or the widget reported a fatal error.
    Error,
}

impl HostState {
    /// Short label for logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            HostState::Uninitialized => "uninitialized",
            HostState::Initializing => "initializing",
            HostState::Ready => "ready",
            HostState::Error => "error",
        }
    }

    /// Whether the host has reached a state that needs no further signal.
    pub fn is_settled(&self) -> bool {
        matches!(self, HostState::Ready | HostState::Error)
    }
}

/// Whether an error message concerns cosmetic assets (glyphs or sprites).
///
/// Such errors leave the globe usable, so they are logged but never shown.
pub fn is_cosmetic_asset_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("glyph") || lower.contains("sprite")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosmetic_asset_errors() {
        assert!(is_cosmetic_asset_error("glyph fetch failed"));
        assert!(is_cosmetic_asset_error("Failed to load Sprite sheet"));
        assert!(is_cosmetic_asset_error("GLYPHS range 0-255 missing"));
        assert!(!is_cosmetic_asset_error("WebGL context lost"));
        assert!(!is_cosmetic_asset_error("tile fetch failed for source 'satellite'"));
    }

    #[test]
    fn test_settled_states() {
        assert!(!HostState::Uninitialized.is_settled());
        assert!(!HostState::Initializing.is_settled());
        assert!(HostState::Ready.is_settled());
        assert!(HostState::Error.is_settled());
    }

    #[test]
    fn test_labels() {
        assert_eq!(HostState::Ready.label(), "ready");
        assert_eq!(HostState::Initializing.label(), "initializing");
    }
}
