//! Sensor capability set and the values it produces.

use std::fmt;

use contracts::{Reading, SensorId, SensorKind};
use serde::Serialize;

/// Capability set shared by every sensor variant
pub trait Sensor {
    /// Immutable identifier
    fn id(&self) -> &SensorId;

    /// Variant of this sensor
    fn kind(&self) -> SensorKind;

    /// Number of recorded measurements
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compute the aggregate over the full history
    ///
    /// An empty history yields [`Aggregate::NoData`].
    fn process(&self) -> Aggregate;

    /// Ordered dump of the history plus aggregate metadata
    fn report(&self) -> SensorReport;
}

/// Summary value produced by [`Sensor::process`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Aggregate {
    /// No measurements recorded yet
    NoData,
    /// Lowest thermal reading, °C
    Minimum(f32),
    /// Arithmetic mean of barometric readings, Pa
    Mean(f64),
}

impl Aggregate {
    /// Aggregate as a float, `None` when there is no data
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::NoData => None,
            Self::Minimum(v) => Some(f64::from(*v)),
            Self::Mean(v) => Some(*v),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => write!(f, "no data"),
            Self::Minimum(v) => write!(f, "minimum {v:.1} °C"),
            Self::Mean(v) => write!(f, "mean {v:.2} Pa"),
        }
    }
}

/// Human-readable snapshot of one sensor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReport {
    pub id: SensorId,
    pub kind: SensorKind,
    pub count: usize,
    pub readings: Vec<Reading>,
    pub aggregate: Aggregate,
}

impl fmt::Display for SensorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ">>> Sensor {} <<<", self.id)?;
        writeln!(f, "  Kind:      {}", self.kind)?;
        writeln!(f, "  Readings:  {}", self.count)?;
        if !self.readings.is_empty() {
            let values: Vec<String> = self.readings.iter().map(|r| r.to_string()).collect();
            writeln!(f, "  History:   {}", values.join(", "))?;
        }
        write!(f, "  Aggregate: {}", self.aggregate)
    }
}
