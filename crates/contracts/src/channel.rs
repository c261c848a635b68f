//! Line channel connection parameters and cancellation.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Transmission rate, restricted to the rates the paired transmitter supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BaudRate {
    /// Conservative baseline rate
    #[default]
    B9600,
    B19200,
    B38400,
    B57600,
    B115200,
}

impl BaudRate {
    /// All supported rates, ascending
    pub const ALL: [BaudRate; 5] = [
        BaudRate::B9600,
        BaudRate::B19200,
        BaudRate::B38400,
        BaudRate::B57600,
        BaudRate::B115200,
    ];

    /// Exact match against the supported set
    pub fn try_from_u32(rate: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_u32() == rate)
    }

    /// Select a rate, falling back to the baseline for unsupported values
    pub fn select(rate: u32) -> Self {
        Self::try_from_u32(rate).unwrap_or_default()
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            Self::B9600 => 9600,
            Self::B19200 => 19200,
            Self::B38400 => 38400,
            Self::B57600 => 57600,
            Self::B115200 => 115200,
        }
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} baud", self.as_u32())
    }
}

/// Parameters accepted when opening a line channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelParams {
    /// Transmission rate (serial devices only)
    pub baud_rate: BaudRate,

    /// Pause after opening a device, lets the transmitter reset and print its banner
    pub settle_delay: Duration,

    /// Read timeout / sleep between empty reads
    pub poll_interval: Duration,
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self {
            baud_rate: BaudRate::default(),
            settle_delay: Duration::from_secs(2),
            poll_interval: Duration::from_millis(10),
        }
    }
}

/// Cooperative cancellation flag for blocking reads and the ingestion loop
///
/// Clones share the same flag. Once cancelled it stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
