//! # Registry
//!
//! Sensor storage and aggregation.
//!
//! Responsibilities:
//! - `OwningSequence<T>`: owning, order-preserving container with deep copy
//! - Thermal (minimum) and barometric (mean) sensor variants
//! - `SensorRegistry`: every known sensor, looked up by identifier
//!
//! ## Usage Example
//!
//! ```
//! use contracts::{Reading, SensorId, SensorKind};
//! use registry::{Aggregate, Sensor, SensorRegistry};
//!
//! let mut registry = SensorRegistry::new();
//! let id = SensorId::new("PRES-105").unwrap();
//! registry.register(SensorKind::Barometric, id);
//!
//! registry.add_reading("PRES-105", Reading::Pascal(101)).unwrap();
//! registry.add_reading("PRES-105", Reading::Pascal(102)).unwrap();
//!
//! let sensor = registry.lookup("PRES-105").unwrap();
//! assert_eq!(sensor.process(), Aggregate::Mean(101.5));
//! ```

mod barometric;
mod record;
mod registry;
mod sensor;
mod sequence;
mod thermal;

// Re-exports
pub use barometric::BarometricSensor;
pub use record::SensorRecord;
pub use registry::SensorRegistry;
pub use sensor::{Aggregate, Sensor, SensorReport};
pub use sequence::OwningSequence;
pub use thermal::ThermalSensor;
