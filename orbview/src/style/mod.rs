//! Globe style document.
//!
//! A declarative, serializable description of map sources, ordered layers,
//! fog and glyph/sprite endpoints, in the v8 style schema consumed by the
//! map widget.
//!
//! The document is built once per process ([`globe_style`]) and handed to the
//! widget at creation time. Nothing validates it on the construction path;
//! a widget runs [`StyleDocument::validate`] when it loads the style and
//! reports failures through its error signal.

mod error;
mod expression;
mod globe;
mod types;
mod urls;
mod validate;

pub use error::{StyleError, StyleResult};
pub use expression::{Interpolation, Stop, StopValue};
pub use globe::{globe_style, GLOBE_LAYER_ORDER, GLOBE_STYLE_NAME};
pub use types::{
    Fog, LayerType, Projection, ProjectionSpec, PropertyMap, PropertyValue, Source, SourceKind,
    StyleDocument, StyleLayer, STYLE_VERSION,
};
pub use urls::{resolve_glyph_url, resolve_tile_url, sprite_urls, SpriteUrls, DEFAULT_GLYPH_RANGE};
