//! Style document error types.

use thiserror::Error;

/// Result type for style operations.
pub type StyleResult<T> = Result<T, StyleError>;

/// Errors raised while loading or validating a style document.
#[derive(Debug, Error)]
pub enum StyleError {
    /// Failed to read a style file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid style JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Only version 8 documents are understood by the widget.
    #[error("Unsupported style version: {0} (expected 8)")]
    UnsupportedVersion(u32),

    /// Two layers share the same id.
    #[error("Duplicate layer id '{0}'")]
    DuplicateLayer(String),

    /// A data layer has no `source` key.
    #[error("Layer '{layer}' of type {layer_type} requires a source")]
    MissingSource { layer: String, layer_type: String },

    /// A layer names a source that is not declared.
    #[error("Layer '{layer}' references unknown source '{source_id}'")]
    UnknownSource { layer: String, source_id: String },

    /// A zoom interpolation is malformed.
    #[error("Layer '{layer}' property '{property}': {reason}")]
    BadInterpolation {
        layer: String,
        property: String,
        reason: String,
    },

    /// A fog scalar lies outside its allowed range.
    #[error("Fog property '{property}' out of range: {value}")]
    FogOutOfRange { property: &'static str, value: f64 },
}
