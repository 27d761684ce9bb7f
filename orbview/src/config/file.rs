//! INI configuration file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ini::Ini;

use crate::style::{Projection, StyleDocument};
use crate::widget::{LngLat, WidgetOptions};

use super::deploy::DeployConfig;
use super::error::ConfigError;
use super::keys::ConfigKey;

/// Directory name under the platform config dir.
const CONFIG_DIR_NAME: &str = "orbview";

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.ini";

/// Path of the user configuration file.
///
/// `~/.config/orbview/config.ini` on Linux; falls back to the current
/// directory when the platform has no config dir.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

/// `[view]` section: initial camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub center_lng: f64,
    pub center_lat: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub projection: Projection,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            center_lng: 0.0,
            center_lat: 20.0,
            zoom: 1.5,
            pitch: 0.0,
            projection: Projection::Globe,
        }
    }
}

/// `[render]` section: widget flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub attribution_control: bool,
    pub antialias: bool,
    pub interactive: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            attribution_control: true,
            antialias: true,
            interactive: true,
        }
    }
}

/// `[deploy]` section: static export packaging.
#[derive(Debug, Clone, PartialEq)]
pub struct DeploySettings {
    pub production: bool,
    pub base_path: String,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            production: false,
            base_path: "/orbview".to_string(),
        }
    }
}

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub view: ViewSettings,
    pub render: RenderSettings,
    pub deploy: DeploySettings,
}

impl ConfigFile {
    /// Load from the default location; missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`; missing file yields defaults.
    ///
    /// Keys not listed in [`ConfigKey`] are ignored with a warning.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(config);
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        for (section, properties) in ini.iter() {
            let Some(section) = section else { continue };
            for (key, value) in properties.iter() {
                let name = format!("{}.{}", section, key);
                match name.parse::<ConfigKey>() {
                    Ok(config_key) => config_key.set(&mut config, value)?,
                    Err(_) => tracing::warn!(key = %name, "Unknown config key ignored"),
                }
            }
        }

        tracing::debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini.write_to_file(path)?;

        tracing::info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Widget options for `style` with this file's camera and flags.
    pub fn widget_options(&self, style: Arc<StyleDocument>) -> WidgetOptions {
        WidgetOptions {
            style,
            center: LngLat::new(self.view.center_lng, self.view.center_lat),
            zoom: self.view.zoom,
            pitch: self.view.pitch,
            projection: self.view.projection,
            attribution_control: self.render.attribution_control,
            antialias: self.render.antialias,
            interactive: self.render.interactive,
        }
    }

    /// Packaging settings for a static export.
    pub fn deploy_config(&self) -> DeployConfig {
        DeployConfig::resolve(self.deploy.production, &self.deploy.base_path)
    }
}
