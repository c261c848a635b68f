//! StationBlueprint - Config Loader output
//!
//! Describes the station: the line channel to ingest from and the sensors to
//! register at start-up.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{BaudRate, ChannelParams, SensorKind};

/// Configuration version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete station configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationBlueprint {
    /// Configuration version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Line channel settings
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Sensors registered before any ingestion
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

/// Line channel settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Device path (e.g., "/dev/ttyACM0"); the CLI may override it
    #[serde(default)]
    pub address: Option<String>,

    /// Requested transmission rate; unsupported values fall back to 9600
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    /// Pause after opening the device, in milliseconds
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Read timeout / empty-read sleep, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_settle_delay_ms() -> u64 {
    2000
}

fn default_poll_interval_ms() -> u64 {
    10
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            address: None,
            baud_rate: default_baud_rate(),
            settle_delay_ms: default_settle_delay_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ChannelConfig {
    /// Whether `baud_rate` is one of the supported rates
    pub fn baud_rate_supported(&self) -> bool {
        BaudRate::try_from_u32(self.baud_rate).is_some()
    }

    /// Convert to channel open parameters
    pub fn params(&self) -> ChannelParams {
        ChannelParams {
            baud_rate: BaudRate::select(self.baud_rate),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

/// Sensor pre-registration entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Unique identifier
    pub id: String,

    /// Sensor variant
    pub kind: SensorKind,
}
