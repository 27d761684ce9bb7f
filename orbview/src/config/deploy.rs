//! Static export packaging.
//!
//! The globe is published as a static export. In production it is served
//! from a sub-path, so page links and asset URLs need a prefix; locally it is
//! served from the root.

/// Output mode of the export.
pub const EXPORT_OUTPUT: &str = "export";

/// Resolved packaging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub output: &'static str,
    /// Prefix for page routes (empty outside production).
    pub base_path: String,
    /// Prefix for static assets, with trailing slash (empty outside production).
    pub asset_prefix: String,
}

impl DeployConfig {
    /// Choose prefixes from the production flag.
    pub fn resolve(production: bool, base_path: &str) -> Self {
        let base = base_path.trim_end_matches('/');
        if production && !base.is_empty() {
            Self {
                output: EXPORT_OUTPUT,
                base_path: base.to_string(),
                asset_prefix: format!("{}/", base),
            }
        } else {
            Self {
                output: EXPORT_OUTPUT,
                base_path: String::new(),
                asset_prefix: String::new(),
            }
        }
    }

    /// Prefix an asset path.
    pub fn asset_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.asset_prefix.is_empty() {
            format!("/{}", path)
        } else {
            format!("{}{}", self.asset_prefix, path)
        }
    }
}
