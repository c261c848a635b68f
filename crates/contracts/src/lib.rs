//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Line Protocol
//! - One record per line: `<T|P> <identifier> <value>`
//! - Tags are case-insensitive; `T` carries Celsius floats, `P` carries Pascal integers

mod blueprint;
mod channel;
mod error;
mod line_source;
mod sensor;
mod sensor_id;

pub use blueprint::*;
pub use channel::{BaudRate, CancelToken, ChannelParams};
pub use error::*;
pub use line_source::LineSource;
pub use sensor::*;
pub use sensor_id::{SensorId, MAX_SENSOR_ID_LEN};
