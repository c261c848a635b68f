//! Barometric sensor: Pascal readings, reports the arithmetic mean.

use contracts::{Reading, SensorId, SensorKind};
use tracing::{debug, info};

use crate::sensor::{Aggregate, Sensor, SensorReport};
use crate::sequence::OwningSequence;

#[derive(Debug, Clone)]
pub struct BarometricSensor {
    id: SensorId,
    readings: OwningSequence<i32>,
}

impl BarometricSensor {
    pub fn new(id: SensorId) -> Self {
        debug!(sensor_id = %id, "barometric sensor created");
        Self {
            id,
            readings: OwningSequence::new(),
        }
    }

    pub fn add_reading(&mut self, pascal: i32) {
        self.readings.append(pascal);
        debug!(sensor_id = %self.id, value = pascal, "barometric reading stored");
    }

    fn mean(&self) -> Option<f64> {
        if self.readings.is_empty() {
            return None;
        }

        // widened accumulator
        let mut sum: i64 = 0;
        self.readings.for_each(|v| sum += i64::from(*v));
        Some(sum as f64 / self.readings.len() as f64)
    }
}

impl Sensor for BarometricSensor {
    fn id(&self) -> &SensorId {
        &self.id
    }

    fn kind(&self) -> SensorKind {
        SensorKind::Barometric
    }

    fn len(&self) -> usize {
        self.readings.len()
    }

    fn process(&self) -> Aggregate {
        let Some(mean) = self.mean() else {
            info!(sensor_id = %self.id, "barometric sensor has no data");
            return Aggregate::NoData;
        };

        info!(sensor_id = %self.id, mean, "barometric mean computed");
        Aggregate::Mean(mean)
    }

    fn report(&self) -> SensorReport {
        SensorReport {
            id: self.id.clone(),
            kind: SensorKind::Barometric,
            count: self.readings.len(),
            readings: self.readings.iter().map(|v| Reading::Pascal(*v)).collect(),
            aggregate: self.mean().map_or(Aggregate::NoData, Aggregate::Mean),
        }
    }
}
