//! Style document types (v8 schema).

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::StyleResult;
use super::expression::Interpolation;

/// Schema version understood by the map widget.
pub const STYLE_VERSION: u32 = 8;

/// Paint or layout properties keyed by property name.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// Complete style document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sources: BTreeMap<String, Source>,
    /// Paint order, bottom to top.
    #[serde(default)]
    pub layers: Vec<StyleLayer>,
    /// Glyph URL template with `{fontstack}` and `{range}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    /// Sprite base URL (`.json` / `.png` are appended).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog: Option<Fog>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionSpec>,
}

impl StyleDocument {
    /// Parse a style document from JSON.
    pub fn from_json(json: &str) -> StyleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a style document from a JSON file.
    pub fn load(path: &Path) -> StyleResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> StyleResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> StyleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Layer ids in paint order.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    /// Find a layer by id.
    pub fn layer(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// Find a source by id.
    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.get(id)
    }

    /// All layers of one type, in paint order.
    pub fn layers_by_type(&self, layer_type: LayerType) -> Vec<&StyleLayer> {
        self.layers
            .iter()
            .filter(|l| l.layer_type == layer_type)
            .collect()
    }

    /// Font stacks referenced by symbol layers, first occurrence order.
    pub fn font_stacks(&self) -> Vec<Vec<String>> {
        let mut stacks: Vec<Vec<String>> = Vec::new();
        for layer in self.layers_by_type(LayerType::Symbol) {
            if let Some(PropertyValue::List(fonts)) = layer.layout.get("text-font") {
                if !stacks.contains(fonts) {
                    stacks.push(fonts.clone());
                }
            }
        }
        stacks
    }
}

/// Kind of remote data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Raster,
    Vector,
}

/// A named remote tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Tile URL templates with `{z}`, `{x}`, `{y}` placeholders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiles: Vec<String>,
    #[serde(rename = "tileSize", default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

/// Layer types used by the globe style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Background,
    Raster,
    Fill,
    Line,
    Symbol,
}

impl LayerType {
    /// Whether layers of this type draw from a source.
    pub fn needs_source(&self) -> bool {
        !matches!(self, LayerType::Background)
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerType::Background => "background",
            LayerType::Raster => "raster",
            LayerType::Fill => "fill",
            LayerType::Line => "line",
            LayerType::Symbol => "symbol",
        };
        f.pad(name)
    }
}

/// One rendering rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: LayerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "source-layer", default, skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    /// Filter expression, passed through to the widget untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub layout: PropertyMap,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paint: PropertyMap,
}

impl StyleLayer {
    /// Create a layer with empty paint/layout.
    pub fn new(id: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            id: id.into(),
            layer_type,
            source: None,
            source_layer: None,
            minzoom: None,
            maxzoom: None,
            filter: None,
            layout: PropertyMap::new(),
            paint: PropertyMap::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_source_layer(mut self, source_layer: impl Into<String>) -> Self {
        self.source_layer = Some(source_layer.into());
        self
    }

    pub fn with_zoom_range(mut self, minzoom: Option<f64>, maxzoom: Option<f64>) -> Self {
        self.minzoom = minzoom;
        self.maxzoom = maxzoom;
        self
    }

    pub fn with_filter(mut self, filter: serde_json::Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn paint(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.paint.insert(name.to_string(), value.into());
        self
    }

    pub fn layout(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.layout.insert(name.to_string(), value.into());
        self
    }

    /// Every zoom interpolation in paint and layout, with its property name.
    pub fn interpolations(&self) -> impl Iterator<Item = (&str, &Interpolation)> {
        self.layout
            .iter()
            .chain(self.paint.iter())
            .filter_map(|(name, value)| match value {
                PropertyValue::Interpolated(interp) => Some((name.as_str(), interp)),
                _ => None,
            })
    }
}

/// A paint or layout value.
///
/// Variant order matters for untagged deserialization: an array is first tried
/// as a linear zoom interpolation, then as a literal string list (font
/// stacks), and only then kept as an opaque expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    /// Colors, enum keywords and text-field templates.
    Text(String),
    Interpolated(Interpolation),
    List(Vec<String>),
    Expression(serde_json::Value),
}

impl PropertyValue {
    /// Literal string list (font stacks).
    pub fn list(items: &[&str]) -> Self {
        PropertyValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<Interpolation> for PropertyValue {
    fn from(value: Interpolation) -> Self {
        PropertyValue::Interpolated(value)
    }
}

/// Distance-based atmosphere blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fog {
    /// Color of the atmosphere near the horizon.
    pub color: String,
    /// Color of the upper atmosphere.
    pub high_color: String,
    /// Thickness of the horizon band, 0..=1.
    pub horizon_blend: f64,
    /// Background color behind the globe.
    pub space_color: String,
    /// Brightness of the star field, 0..=1.
    pub star_intensity: f64,
    /// Start and end distance of the fog, in screen heights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

/// Map projection requested from the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Globe,
    Mercator,
}

impl Projection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::Globe => "globe",
            Projection::Mercator => "mercator",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "globe" => Ok(Projection::Globe),
            "mercator" => Ok(Projection::Mercator),
            other => Err(format!("unknown projection '{}'", other)),
        }
    }
}

/// `{"type": "globe"}` projection entry of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSpec {
    #[serde(rename = "type")]
    pub kind: Projection,
}
