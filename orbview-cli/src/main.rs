//! Orbview CLI - Command-line interface
//!
//! Inspect the globe style, check that the widget host can load it, and
//! manage configuration.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use orbview::logging::{init_logging, LoggingConfig};

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "orbview", version, about = "Stylized 3D globe style and widget host")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the globe style document
    Style {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,

        /// List layers in paint order instead of printing JSON
        #[arg(long)]
        layers: bool,

        /// Validate a style file instead of the built-in globe style
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Mount the widget host and report whether the globe loads
    Check {
        /// Seconds to wait for the widget to settle
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Use the no-op widget instead of fetching remote resources
        #[arg(long)]
        offline: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        verbose: cli.verbose,
        log_file: cli.log_file.clone(),
    };
    let _guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Style {
            pretty,
            layers,
            file,
        } => commands::style::run(commands::style::StyleArgs {
            pretty,
            layers,
            file,
        }),
        Commands::Check { timeout, offline } => {
            commands::check::run(commands::check::CheckArgs { timeout, offline })
        }
        Commands::Config { command } => commands::config::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["orbview", "check"]).unwrap();
        match cli.command {
            Commands::Check { timeout, offline } => {
                assert_eq!(timeout, 30);
                assert!(!offline);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["orbview", "-v", "config", "set", "view.zoom", "2"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set { .. }
            }
        ));
    }
}
