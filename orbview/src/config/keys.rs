//! Typed configuration keys for `config get/set/list`.

use std::str::FromStr;

use super::error::ConfigError;
use super::file::ConfigFile;

/// Every settable key, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ViewCenterLng,
    ViewCenterLat,
    ViewZoom,
    ViewPitch,
    ViewProjection,
    RenderAttributionControl,
    RenderAntialias,
    RenderInteractive,
    DeployProduction,
    DeployBasePath,
}

const ALL_KEYS: [ConfigKey; 10] = [
    ConfigKey::ViewCenterLng,
    ConfigKey::ViewCenterLat,
    ConfigKey::ViewZoom,
    ConfigKey::ViewPitch,
    ConfigKey::ViewProjection,
    ConfigKey::RenderAttributionControl,
    ConfigKey::RenderAntialias,
    ConfigKey::RenderInteractive,
    ConfigKey::DeployProduction,
    ConfigKey::DeployBasePath,
];

impl ConfigKey {
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ViewCenterLng
            | ConfigKey::ViewCenterLat
            | ConfigKey::ViewZoom
            | ConfigKey::ViewPitch
            | ConfigKey::ViewProjection => "view",
            ConfigKey::RenderAttributionControl
            | ConfigKey::RenderAntialias
            | ConfigKey::RenderInteractive => "render",
            ConfigKey::DeployProduction | ConfigKey::DeployBasePath => "deploy",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ViewCenterLng => "center_lng",
            ConfigKey::ViewCenterLat => "center_lat",
            ConfigKey::ViewZoom => "zoom",
            ConfigKey::ViewPitch => "pitch",
            ConfigKey::ViewProjection => "projection",
            ConfigKey::RenderAttributionControl => "attribution_control",
            ConfigKey::RenderAntialias => "antialias",
            ConfigKey::RenderInteractive => "interactive",
            ConfigKey::DeployProduction => "production",
            ConfigKey::DeployBasePath => "base_path",
        }
    }

    /// Current value as written in the file.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ViewCenterLng => config.view.center_lng.to_string(),
            ConfigKey::ViewCenterLat => config.view.center_lat.to_string(),
            ConfigKey::ViewZoom => config.view.zoom.to_string(),
            ConfigKey::ViewPitch => config.view.pitch.to_string(),
            ConfigKey::ViewProjection => config.view.projection.to_string(),
            ConfigKey::RenderAttributionControl => config.render.attribution_control.to_string(),
            ConfigKey::RenderAntialias => config.render.antialias.to_string(),
            ConfigKey::RenderInteractive => config.render.interactive.to_string(),
            ConfigKey::DeployProduction => config.deploy.production.to_string(),
            ConfigKey::DeployBasePath => config.deploy.base_path.clone(),
        }
    }

    /// Parse `value` and store it.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::ViewCenterLng => {
                config.view.center_lng = self.parse_ranged(value, -180.0, 180.0)?
            }
            ConfigKey::ViewCenterLat => {
                config.view.center_lat = self.parse_ranged(value, -90.0, 90.0)?
            }
            ConfigKey::ViewZoom => config.view.zoom = self.parse_ranged(value, 0.0, 24.0)?,
            ConfigKey::ViewPitch => config.view.pitch = self.parse_ranged(value, 0.0, 85.0)?,
            ConfigKey::ViewProjection => {
                config.view.projection = value.parse().map_err(|reason| self.invalid(reason))?
            }
            ConfigKey::RenderAttributionControl => {
                config.render.attribution_control = self.parse_bool(value)?
            }
            ConfigKey::RenderAntialias => config.render.antialias = self.parse_bool(value)?,
            ConfigKey::RenderInteractive => config.render.interactive = self.parse_bool(value)?,
            ConfigKey::DeployProduction => config.deploy.production = self.parse_bool(value)?,
            ConfigKey::DeployBasePath => {
                if !value.is_empty() && !value.starts_with('/') {
                    return Err(self.invalid("base path must start with '/'".to_string()));
                }
                config.deploy.base_path = value.trim_end_matches('/').to_string();
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            reason,
        }
    }

    fn parse_ranged(&self, value: &str, min: f64, max: f64) -> Result<f64, ConfigError> {
        let parsed: f64 = value
            .parse()
            .map_err(|_| self.invalid(format!("'{}' is not a number", value)))?;
        if !(min..=max).contains(&parsed) {
            return Err(self.invalid(format!("{} is outside {}..={}", parsed, min, max)));
        }
        Ok(parsed)
    }

    fn parse_bool(&self, value: &str) -> Result<bool, ConfigError> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(self.invalid(format!("'{}' is not a boolean", value))),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_KEYS
            .iter()
            .copied()
            .find(|key| key.name() == s.trim())
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}
