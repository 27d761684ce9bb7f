//! The stylized globe style.
//!
//! Dark space backdrop, desaturated satellite terrain, a glowing coastline and
//! green land cover, with continent, country and city labels on top.
//!
//! # Layer order
//!
//! ```text
//! background → terrain-raster → water-fill → coastline-glow
//!            → landcover-green → landuse-green
//!            → continent-label → country-label → city-label
//! ```
//!
//! The order is the paint order and must not change. Interpolation
//! breakpoints are tuned by eye; keep them exactly as written.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde_json::json;

use super::expression::Interpolation;
use super::types::{
    Fog, LayerType, Projection, ProjectionSpec, PropertyValue, Source, SourceKind, StyleDocument,
    StyleLayer, STYLE_VERSION,
};

/// Name of the globe style document.
pub const GLOBE_STYLE_NAME: &str = "Orbview Globe";

/// Paint order of the globe layers.
pub const GLOBE_LAYER_ORDER: [&str; 9] = [
    "background",
    "terrain-raster",
    "water-fill",
    "coastline-glow",
    "landcover-green",
    "landuse-green",
    "continent-label",
    "country-label",
    "city-label",
];

const SATELLITE_SOURCE: &str = "satellite";
const VECTOR_SOURCE: &str = "openmaptiles";

const SATELLITE_TILES: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const VECTOR_TILES: &str = "https://tiles.openfreemap.org/planet/{z}/{x}/{y}.pbf";
const GLYPHS_URL: &str = "https://demotiles.maplibre.org/font/{fontstack}/{range}.pbf";
const SPRITE_URL: &str = "https://demotiles.maplibre.org/styles/osm-bright-gl-style/sprite";

const LABEL_FONT_BOLD: &str = "Open Sans Semibold";
const LABEL_FONT: &str = "Open Sans Regular";
const LABEL_COLOR: &str = "#e6f1ff";
const LABEL_HALO: &str = "rgba(4, 6, 15, 0.85)";

/// Process-wide globe style, built on first access.
static GLOBE_STYLE: OnceLock<Arc<StyleDocument>> = OnceLock::new();

/// The globe style document.
///
/// Built once and shared; callers receive a handle to the same immutable
/// document.
pub fn globe_style() -> Arc<StyleDocument> {
    Arc::clone(GLOBE_STYLE.get_or_init(|| Arc::new(build_globe_style())))
}

fn build_globe_style() -> StyleDocument {
    let mut sources = BTreeMap::new();
    sources.insert(
        SATELLITE_SOURCE.to_string(),
        Source {
            kind: SourceKind::Raster,
            tiles: vec![SATELLITE_TILES.to_string()],
            tile_size: Some(256),
            minzoom: Some(0),
            maxzoom: Some(19),
            attribution: Some("Esri, Maxar, Earthstar Geographics".to_string()),
        },
    );
    sources.insert(
        VECTOR_SOURCE.to_string(),
        Source {
            kind: SourceKind::Vector,
            tiles: vec![VECTOR_TILES.to_string()],
            tile_size: None,
            minzoom: Some(0),
            maxzoom: Some(14),
            attribution: Some("© OpenMapTiles © OpenStreetMap contributors".to_string()),
        },
    );

    StyleDocument {
        version: STYLE_VERSION,
        name: GLOBE_STYLE_NAME.to_string(),
        sources,
        layers: vec![
            background(),
            terrain_raster(),
            water_fill(),
            coastline_glow(),
            landcover_green(),
            landuse_green(),
            continent_label(),
            country_label(),
            city_label(),
        ],
        glyphs: Some(GLYPHS_URL.to_string()),
        sprite: Some(SPRITE_URL.to_string()),
        fog: Some(Fog {
            color: "rgb(186, 210, 235)".to_string(),
            high_color: "#245cdf".to_string(),
            horizon_blend: 0.08,
            space_color: "#04060f".to_string(),
            star_intensity: 0.6,
            range: Some([0.8, 8.0]),
        }),
        projection: Some(ProjectionSpec {
            kind: Projection::Globe,
        }),
    }
}

fn background() -> StyleLayer {
    StyleLayer::new("background", LayerType::Background).paint("background-color", "#04060f")
}

fn terrain_raster() -> StyleLayer {
    StyleLayer::new("terrain-raster", LayerType::Raster)
        .with_source(SATELLITE_SOURCE)
        .paint("raster-opacity", 0.85)
        .paint(
            "raster-saturation",
            Interpolation::linear([(0.0, -0.6), (6.0, -0.2)]),
        )
        .paint("raster-contrast", 0.15)
}

fn water_fill() -> StyleLayer {
    StyleLayer::new("water-fill", LayerType::Fill)
        .with_source(VECTOR_SOURCE)
        .with_source_layer("water")
        .paint("fill-color", "#0a2a4a")
        .paint(
            "fill-opacity",
            Interpolation::linear([(0.0, 0.55), (5.0, 0.8)]),
        )
}

fn coastline_glow() -> StyleLayer {
    StyleLayer::new("coastline-glow", LayerType::Line)
        .with_source(VECTOR_SOURCE)
        .with_source_layer("water")
        .paint("line-color", "#4fd1ff")
        .paint(
            "line-width",
            Interpolation::linear([(0.0, 0.6), (4.0, 1.5), (8.0, 3.0)]),
        )
        .paint("line-blur", Interpolation::linear([(0.0, 1.0), (8.0, 4.0)]))
        .paint("line-opacity", 0.6)
}

fn landcover_green() -> StyleLayer {
    StyleLayer::new("landcover-green", LayerType::Fill)
        .with_source(VECTOR_SOURCE)
        .with_source_layer("landcover")
        .with_filter(json!(["in", "class", "grass", "wood", "forest", "farmland"]))
        .paint("fill-color", "#1f5f3a")
        .paint(
            "fill-opacity",
            Interpolation::linear([(0.0, 0.25), (6.0, 0.45)]),
        )
}

fn landuse_green() -> StyleLayer {
    StyleLayer::new("landuse-green", LayerType::Fill)
        .with_source(VECTOR_SOURCE)
        .with_source_layer("landuse")
        .with_zoom_range(Some(5.0), None)
        .with_filter(json!(["in", "class", "park", "cemetery", "grass"]))
        .paint("fill-color", "#2f7a4b")
        .paint("fill-opacity", 0.3)
}

fn label(id: &str, class: &str, font: &str, size: Interpolation) -> StyleLayer {
    StyleLayer::new(id, LayerType::Symbol)
        .with_source(VECTOR_SOURCE)
        .with_source_layer("place")
        .with_filter(json!(["==", "class", class]))
        .layout("text-field", "{name:latin}")
        .layout("text-font", PropertyValue::list(&[font]))
        .layout("text-size", size)
        .paint("text-color", LABEL_COLOR)
        .paint("text-halo-color", LABEL_HALO)
        .paint("text-halo-width", 1.5)
}

fn continent_label() -> StyleLayer {
    label(
        "continent-label",
        "continent",
        LABEL_FONT_BOLD,
        Interpolation::linear([(0.0, 10.0), (3.0, 16.0)]),
    )
    .with_zoom_range(None, Some(3.0))
    .layout("text-transform", "uppercase")
    .layout("text-letter-spacing", 0.3)
}

fn country_label() -> StyleLayer {
    label(
        "country-label",
        "country",
        LABEL_FONT_BOLD,
        Interpolation::linear([(1.0, 9.0), (4.0, 13.0), (6.0, 16.0)]),
    )
    .with_zoom_range(Some(1.0), Some(8.0))
}

fn city_label() -> StyleLayer {
    label(
        "city-label",
        "city",
        LABEL_FONT,
        Interpolation::linear([(3.0, 9.0), (8.0, 14.0), (12.0, 18.0)]),
    )
    .with_zoom_range(Some(3.0), None)
}
