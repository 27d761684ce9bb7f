//! Zoom-interpolated property values.
//!
//! The globe style uses a single interpolation scheme: linear interpolation
//! over explicit `(zoom, value)` breakpoints. On the wire this is the style
//! expression
//!
//! ```text
//! ["interpolate", ["linear"], ["zoom"], z0, v0, z1, v1, ...]
//! ```
//!
//! Breakpoints are stored verbatim; serialization writes them back exactly as
//! authored.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output value at one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopValue {
    /// Numeric output (widths, sizes, opacities).
    Number(f64),
    /// Color string output (e.g. `"#4fd1ff"`).
    Color(String),
}

impl From<f64> for StopValue {
    fn from(value: f64) -> Self {
        StopValue::Number(value)
    }
}

impl From<&str> for StopValue {
    fn from(value: &str) -> Self {
        StopValue::Color(value.to_string())
    }
}

/// A single breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub zoom: f64,
    pub value: StopValue,
}

/// Linear interpolation over zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    stops: Vec<Stop>,
}

impl Interpolation {
    /// Build a linear zoom interpolation from `(zoom, value)` pairs.
    ///
    /// Stops are kept in the order given.
    pub fn linear<V, I>(stops: I) -> Self
    where
        V: Into<StopValue>,
        I: IntoIterator<Item = (f64, V)>,
    {
        Self {
            stops: stops
                .into_iter()
                .map(|(zoom, value)| Stop {
                    zoom,
                    value: value.into(),
                })
                .collect(),
        }
    }

    /// The authored breakpoints.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Check breakpoint ordering.
    ///
    /// Returns a description of the first problem found.
    pub fn check(&self) -> Result<(), String> {
        if self.stops.is_empty() {
            return Err("interpolation needs at least one stop".to_string());
        }
        for pair in self.stops.windows(2) {
            if pair[1].zoom <= pair[0].zoom {
                return Err(format!(
                    "zoom stops must be strictly ascending ({} then {})",
                    pair[0].zoom, pair[1].zoom
                ));
            }
        }
        Ok(())
    }

    /// Evaluate at `zoom`.
    ///
    /// Clamped to the first/last stop outside the breakpoint range. Numeric
    /// stops interpolate linearly; any other pair yields the lower stop.
    pub fn evaluate(&self, zoom: f64) -> Option<StopValue> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;

        if zoom <= first.zoom {
            return Some(first.value.clone());
        }
        if zoom >= last.zoom {
            return Some(last.value.clone());
        }

        let upper = self.stops.iter().position(|s| s.zoom > zoom)?;
        let low = &self.stops[upper - 1];
        let high = &self.stops[upper];

        match (&low.value, &high.value) {
            (StopValue::Number(a), StopValue::Number(b)) => {
                let t = (zoom - low.zoom) / (high.zoom - low.zoom);
                Some(StopValue::Number(a + (b - a) * t))
            }
            _ => Some(low.value.clone()),
        }
    }

    /// Evaluate a numeric interpolation at `zoom`.
    pub fn evaluate_number(&self, zoom: f64) -> Option<f64> {
        match self.evaluate(zoom)? {
            StopValue::Number(n) => Some(n),
            StopValue::Color(_) => None,
        }
    }
}

impl Serialize for Interpolation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(3 + self.stops.len() * 2))?;
        seq.serialize_element("interpolate")?;
        seq.serialize_element(&["linear"])?;
        seq.serialize_element(&["zoom"])?;
        for stop in &self.stops {
            seq.serialize_element(&stop.zoom)?;
            seq.serialize_element(&stop.value)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Interpolation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<Value>::deserialize(deserializer)?;
        parse_interpolation(&items).map_err(de::Error::custom)
    }
}

#[derive(Debug)]
struct NotInterpolation(&'static str);

impl fmt::Display for NotInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a linear zoom interpolation: {}", self.0)
    }
}

fn parse_interpolation(items: &[Value]) -> Result<Interpolation, NotInterpolation> {
    if items.first().and_then(Value::as_str) != Some("interpolate") {
        return Err(NotInterpolation("missing 'interpolate' operator"));
    }
    if items.get(1) != Some(&serde_json::json!(["linear"])) {
        return Err(NotInterpolation("only linear interpolation is supported"));
    }
    if items.get(2) != Some(&serde_json::json!(["zoom"])) {
        return Err(NotInterpolation("input must be ['zoom']"));
    }

    let pairs = &items[3..];
    if pairs.len() % 2 != 0 {
        return Err(NotInterpolation("unpaired stop"));
    }

    let mut stops = Vec::with_capacity(pairs.len() / 2);
    for pair in pairs.chunks(2) {
        let zoom = pair[0]
            .as_f64()
            .ok_or(NotInterpolation("stop zoom must be a number"))?;
        let value = match &pair[1] {
            Value::Number(n) => StopValue::Number(
                n.as_f64()
                    .ok_or(NotInterpolation("stop value out of range"))?,
            ),
            Value::String(s) => StopValue::Color(s.clone()),
            _ => return Err(NotInterpolation("stop value must be a number or color")),
        };
        stops.push(Stop { zoom, value });
    }

    Ok(Interpolation { stops })
}
