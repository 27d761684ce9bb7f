//! Configuration.
//!
//! Settings live in an INI file (`~/.config/orbview/config.ini` on Linux):
//!
//! ```ini
//! [view]
//! center_lng = 0
//! center_lat = 20
//! zoom = 1.5
//! pitch = 0
//! projection = globe
//!
//! [render]
//! attribution_control = true
//! antialias = true
//! interactive = true
//!
//! [deploy]
//! production = false
//! base_path = /orbview
//! ```

mod deploy;
mod error;
mod file;
mod keys;

pub use deploy::{DeployConfig, EXPORT_OUTPUT};
pub use error::ConfigError;
pub use file::{config_file_path, ConfigFile, DeploySettings, RenderSettings, ViewSettings};
pub use keys::ConfigKey;
