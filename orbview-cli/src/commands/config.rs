//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use clap::Subcommand;
use orbview::config::{config_file_path, ConfigFile, ConfigKey};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., view.zoom)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., view.zoom)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_get(key: &str) -> Result<(), CliError> {
    let config_key: ConfigKey = key.parse()?;
    let config = ConfigFile::load()?;
    println!("{}", config_key.get(&config));
    Ok(())
}

fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let config_key: ConfigKey = key.parse()?;

    let mut config = ConfigFile::load()?;
    config_key.set(&mut config, value)?;
    config.save()?;

    println!("Set {} = {}", config_key.name(), config_key.get(&config));
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    print!("{}", render_list(&config));
    Ok(())
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

/// Settings grouped by section, INI style.
fn render_list(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();
        if section != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section));
            current_section = section;
        }
        out.push_str(&format!("  {} = {}\n", key.key_name(), key.get(config)));
    }

    let deploy = config.deploy_config();
    out.push_str("\n[export]\n");
    out.push_str(&format!("  output = {}\n", deploy.output));
    out.push_str(&format!("  asset_root = {}\n", deploy.asset_url("")));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_list_groups_sections() {
        let text = render_list(&ConfigFile::default());
        assert!(text.starts_with("[view]\n  center_lng = 0\n"));
        assert!(text.contains("\n[render]\n  attribution_control = true\n"));
        assert!(text.contains("\n[deploy]\n  production = false\n  base_path = /orbview\n"));
        assert!(text.ends_with("\n[export]\n  output = export\n  asset_root = /\n"));
    }

    #[test]
    fn test_render_list_resolves_production_prefix() {
        let mut config = ConfigFile::default();
        config.deploy.production = true;

        let text = render_list(&config);
        assert!(text.contains("  asset_root = /orbview/\n"));
    }
}
