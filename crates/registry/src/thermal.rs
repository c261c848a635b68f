//! Thermal sensor: Celsius readings, reports the minimum.

use contracts::{Reading, SensorId, SensorKind};
use tracing::{debug, info};

use crate::sensor::{Aggregate, Sensor, SensorReport};
use crate::sequence::OwningSequence;

#[derive(Debug, Clone)]
pub struct ThermalSensor {
    id: SensorId,
    readings: OwningSequence<f32>,
}

impl ThermalSensor {
    pub fn new(id: SensorId) -> Self {
        debug!(sensor_id = %id, "thermal sensor created");
        Self {
            id,
            readings: OwningSequence::new(),
        }
    }

    pub fn add_reading(&mut self, celsius: f32) {
        self.readings.append(celsius);
        debug!(sensor_id = %self.id, value = celsius, "thermal reading stored");
    }

    /// Lowest recorded value, seeded from the first reading
    fn minimum(&self) -> Option<f32> {
        let mut iter = self.readings.iter().copied();
        let first = iter.next()?;
        Some(iter.fold(first, f32::min))
    }
}

impl Sensor for ThermalSensor {
    fn id(&self) -> &SensorId {
        &self.id
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Thermal
    }

    fn len(&self) -> usize {
        self.readings.len()
    }

    fn process(&self) -> Aggregate {
        let Some(min) = self.minimum() else {
            info!(sensor_id = %self.id, "thermal sensor has no data");
            return Aggregate::NoData;
        };

        info!(sensor_id = %self.id, minimum = min, "thermal minimum computed");
        Aggregate::Minimum(min)
    }

    fn report(&self) -> SensorReport {
        SensorReport {
            id: self.id.clone(),
            kind: SensorKind::Thermal,
            count: self.readings.len(),
            readings: self.readings.iter().map(|v| Reading::Celsius(*v)).collect(),
            aggregate: self.minimum().map_or(Aggregate::NoData, Aggregate::Minimum),
        }
    }
}
