//! CLI error types.

use thiserror::Error;

use orbview::config::ConfigError;
use orbview::style::StyleError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    #[error("Failed to create async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed to install interrupt handler: {0}")]
    Signal(#[from] ctrlc::Error),

    #[error("Globe check failed: {0}")]
    Check(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::UnknownKey("view.tilt".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown configuration key 'view.tilt'"
        );
    }

    #[test]
    fn test_check_error_display() {
        let err = CliError::Check("Error: WebGL context lost".to_string());
        assert_eq!(err.to_string(), "Globe check failed: Error: WebGL context lost");
    }
}
