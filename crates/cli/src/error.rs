//! Error types for CLI operations.

use contracts::ContractError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// A command needs a config file but none was given
    #[error("No configuration file given (use --config or SENSOR_STATION_CONFIG)")]
    ConfigMissing,

    /// Serial ingestion without a device address
    #[error("No serial port given (use --port or channel.address)")]
    PortMissing,

    /// Menu input that cannot be used
    #[error("{message}")]
    InvalidInput { message: String },

    /// Core error
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
