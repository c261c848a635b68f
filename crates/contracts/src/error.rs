//! Layered error definitions
//!
//! Categorized by source: connection / record / registry / config

use std::fmt;

use thiserror::Error;

use crate::SensorKind;

/// Why a line channel could not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionFailure {
    /// Device path does not exist
    NotFound,
    /// Device exists but the process may not open it
    PermissionDenied,
    /// Anything else reported by the driver
    Other,
}

impl fmt::Display for ConnectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "device not found"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::Other => write!(f, "connection failed"),
        }
    }
}

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Connection Errors =====
    /// Line channel could not be opened
    #[error("cannot open '{address}': {reason}: {message}")]
    Connection {
        address: String,
        reason: ConnectionFailure,
        message: String,
    },

    // ===== Record Errors =====
    /// Malformed or unparseable record line
    #[error("malformed record '{line}': {message}")]
    Format { line: String, message: String },

    /// Type tag disagrees with the variant already registered for the id
    #[error("sensor '{sensor_id}' is registered as {registered}, got a {received} reading")]
    VariantMismatch {
        sensor_id: String,
        registered: SensorKind,
        received: SensorKind,
    },

    /// Type tag is not one of T/t/P/p
    #[error("unknown sensor type tag '{tag}'")]
    UnknownKind { tag: String },

    /// Identifier outside the accepted bounds
    #[error("invalid sensor identifier '{id}': {message}")]
    InvalidIdentifier { id: String, message: String },

    // ===== Registry Errors =====
    /// No sensor registered under the identifier
    #[error("sensor not found: {sensor_id}")]
    SensorNotFound { sensor_id: String },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create connection error
    pub fn connection(
        address: impl Into<String>,
        reason: ConnectionFailure,
        message: impl Into<String>,
    ) -> Self {
        Self::Connection {
            address: address.into(),
            reason,
            message: message.into(),
        }
    }

    /// Create record format error
    pub fn format(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            line: line.into(),
            message: message.into(),
        }
    }

    /// Create variant mismatch error
    pub fn variant_mismatch(
        sensor_id: impl Into<String>,
        registered: SensorKind,
        received: SensorKind,
    ) -> Self {
        Self::VariantMismatch {
            sensor_id: sensor_id.into(),
            registered,
            received,
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error only affects a single record line
    ///
    /// Record errors are logged and skipped; everything else ends the current operation.
    pub fn is_record_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. }
                | Self::VariantMismatch { .. }
                | Self::UnknownKind { .. }
                | Self::InvalidIdentifier { .. }
        )
    }
}
