//! Load-time style checks.
//!
//! Run by widgets when they load a document. Construction of a document never
//! calls this; failures surface through the widget's error signal.

use std::collections::HashSet;

use super::error::{StyleError, StyleResult};
use super::types::{StyleDocument, STYLE_VERSION};

impl StyleDocument {
    /// Check the document the way the widget does before rendering.
    pub fn validate(&self) -> StyleResult<()> {
        if self.version != STYLE_VERSION {
            return Err(StyleError::UnsupportedVersion(self.version));
        }

        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(StyleError::DuplicateLayer(layer.id.clone()));
            }

            if layer.layer_type.needs_source() {
                let source_id = layer.source.as_ref().ok_or_else(|| StyleError::MissingSource {
                    layer: layer.id.clone(),
                    layer_type: layer.layer_type.to_string(),
                })?;
                if !self.sources.contains_key(source_id) {
                    return Err(StyleError::UnknownSource {
                        layer: layer.id.clone(),
                        source_id: source_id.clone(),
                    });
                }
            }

            for (property, interp) in layer.interpolations() {
                interp
                    .check()
                    .map_err(|reason| StyleError::BadInterpolation {
                        layer: layer.id.clone(),
                        property: property.to_string(),
                        reason,
                    })?;
            }
        }

        if let Some(fog) = &self.fog {
            if !(0.0..=1.0).contains(&fog.horizon_blend) {
                return Err(StyleError::FogOutOfRange {
                    property: "horizon-blend",
                    value: fog.horizon_blend,
                });
            }
            if !(0.0..=1.0).contains(&fog.star_intensity) {
                return Err(StyleError::FogOutOfRange {
                    property: "star-intensity",
                    value: fog.star_intensity,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{globe_style, Interpolation, LayerType, StyleLayer};

    fn globe_copy() -> StyleDocument {
        (*globe_style()).clone()
    }

    #[test]
    fn test_globe_style_is_valid() {
        assert!(globe_style().validate().is_ok());
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut doc = globe_copy();
        doc.version = 7;
        assert!(matches!(
            doc.validate(),
            Err(StyleError::UnsupportedVersion(7))
        ));
    }

    #[test]
    fn test_rejects_unknown_source() {
        let mut doc = globe_copy();
        doc.layers
            .push(StyleLayer::new("roads", LayerType::Line).with_source("streets"));
        let err = doc.validate().unwrap_err();
        assert!(matches!(err, StyleError::UnknownSource { .. }));
        assert!(err.to_string().contains("streets"));
    }

    #[test]
    fn test_rejects_missing_source() {
        let mut doc = globe_copy();
        doc.layers.push(StyleLayer::new("orphan", LayerType::Fill));
        assert!(matches!(
            doc.validate(),
            Err(StyleError::MissingSource { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_layer() {
        let mut doc = globe_copy();
        let dup = doc.layers[0].clone();
        doc.layers.push(dup);
        assert!(matches!(
            doc.validate(),
            Err(StyleError::DuplicateLayer(id)) if id == "background"
        ));
    }

    #[test]
    fn test_rejects_descending_interpolation() {
        let mut doc = globe_copy();
        doc.layers[0] = doc.layers[0].clone().paint(
            "background-opacity",
            Interpolation::linear([(5.0, 1.0), (1.0, 0.5)]),
        );
        let err = doc.validate().unwrap_err();
        assert!(matches!(err, StyleError::BadInterpolation { .. }));
        assert!(err.to_string().contains("background-opacity"));
    }

    #[test]
    fn test_rejects_fog_out_of_range() {
        let mut doc = globe_copy();
        if let Some(fog) = doc.fog.as_mut() {
            fog.star_intensity = 1.5;
        }
        assert!(matches!(
            doc.validate(),
            Err(StyleError::FogOutOfRange {
                property: "star-intensity",
                ..
            })
        ));
    }
}
