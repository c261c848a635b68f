//! # Ingestion Pipeline
//!
//! Line-oriented sensor telemetry ingestion.
//!
//! Responsibilities:
//! - Frame a serial device (or any byte stream) into text lines
//! - Parse `<T|P> <id> <value>` records, filtering transmitter noise
//! - Register unknown sensors on first sight and append readings
//! - Count, log and recover from malformed records
//!
//! ## Usage Example
//!
//! ```no_run
//! use contracts::{CancelToken, ChannelParams};
//! use ingestion::{IngestionPipeline, LineChannel};
//! use registry::SensorRegistry;
//!
//! let mut channel = LineChannel::new();
//! channel.open("/dev/ttyACM0", &ChannelParams::default())?;
//!
//! let mut registry = SensorRegistry::new();
//! let stats = IngestionPipeline::new().run(&mut channel, &mut registry, &CancelToken::new())?;
//! println!("{stats}");
//! # Ok::<(), contracts::ContractError>(())
//! ```
//!
//! ## Simulation
//!
//! ```
//! use contracts::CancelToken;
//! use ingestion::{IngestionPipeline, LineChannel, MockTransmitter};
//! use registry::SensorRegistry;
//!
//! let mut channel = LineChannel::new();
//! channel.attach("mock", MockTransmitter::seeded(1, 4));
//!
//! let mut registry = SensorRegistry::new();
//! let stats = IngestionPipeline::new()
//!     .run(&mut channel, &mut registry, &CancelToken::new())
//!     .unwrap();
//! assert_eq!(stats.records_accepted, 4);
//! assert_eq!(registry.len(), 2);
//! ```

mod channel;
mod mock;
mod parser;
mod pipeline;
#[cfg(feature = "serial")]
mod serial;
mod stats;

// Re-exports
pub use channel::{select_baud_rate, LineChannel};
pub use mock::{MockTransmitter, MockTransmitterConfig, BANNER, FORMAT_HINT};
pub use parser::{is_noise, parse_record, NOISE_MARKERS};
pub use pipeline::{IngestionPipeline, LineOutcome};
pub use stats::IngestionStats;
