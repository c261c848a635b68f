//! SensorRecord - closed set of sensor variants stored by the registry.

use contracts::{ContractError, Reading, SensorId, SensorKind};

use crate::barometric::BarometricSensor;
use crate::sensor::{Aggregate, Sensor, SensorReport};
use crate::thermal::ThermalSensor;

/// One registered sensor device
#[derive(Debug, Clone)]
pub enum SensorRecord {
    Thermal(ThermalSensor),
    Barometric(BarometricSensor),
}

impl SensorRecord {
    /// Create an empty sensor of the given kind
    pub fn new(kind: SensorKind, id: SensorId) -> Self {
        match kind {
            SensorKind::Thermal => Self::Thermal(ThermalSensor::new(id)),
            SensorKind::Barometric => Self::Barometric(BarometricSensor::new(id)),
        }
    }

    pub fn thermal(id: SensorId) -> Self {
        Self::Thermal(ThermalSensor::new(id))
    }

    pub fn barometric(id: SensorId) -> Self {
        Self::Barometric(BarometricSensor::new(id))
    }

    /// Append a reading, checking that its kind matches this sensor
    pub fn add_reading(&mut self, reading: Reading) -> Result<(), ContractError> {
        match (self, reading) {
            (Self::Thermal(s), Reading::Celsius(v)) => s.add_reading(v),
            (Self::Barometric(s), Reading::Pascal(v)) => s.add_reading(v),
            (record, reading) => {
                return Err(ContractError::variant_mismatch(
                    record.id().as_str(),
                    record.kind(),
                    reading.kind(),
                ))
            }
        }
        Ok(())
    }

    fn as_sensor(&self) -> &dyn Sensor {
        match self {
            Self::Thermal(s) => s,
            Self::Barometric(s) => s,
        }
    }
}

impl Sensor for SensorRecord {
    fn id(&self) -> &SensorId {
        self.as_sensor().id()
    }

    fn kind(&self) -> SensorKind {
        self.as_sensor().kind()
    }

    fn len(&self) -> usize {
        self.as_sensor().len()
    }

    fn process(&self) -> Aggregate {
        self.as_sensor().process()
    }

    fn report(&self) -> SensorReport {
        self.as_sensor().report()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SensorId {
        SensorId::new(s).unwrap()
    }

    #[test]
    fn test_new_matches_kind() {
        let t = SensorRecord::new(SensorKind::Thermal, id("T1"));
        let p = SensorRecord::new(SensorKind::Barometric, id("P1"));
        assert_eq!(t.kind(), SensorKind::Thermal);
        assert_eq!(p.kind(), SensorKind::Barometric);
        assert!(t.is_empty());
    }

    #[test]
    fn test_add_matching_reading() {
        let mut record = SensorRecord::thermal(id("TEMP-1"));
        record.add_reading(Reading::Celsius(23.5)).unwrap();
        record.add_reading(Reading::Celsius(24.0)).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.process(), Aggregate::Minimum(23.5));
    }

    #[test]
    fn test_mismatched_reading_is_rejected() {
        let mut record = SensorRecord::thermal(id("TEMP-1"));
        let err = record.add_reading(Reading::Pascal(10)).unwrap_err();
        assert!(matches!(
            err,
            ContractError::VariantMismatch {
                registered: SensorKind::Thermal,
                received: SensorKind::Barometric,
                ..
            }
        ));
        assert!(record.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = SensorRecord::barometric(id("PRES-1"));
        original.add_reading(Reading::Pascal(100)).unwrap();

        let mut copy = original.clone();
        copy.add_reading(Reading::Pascal(300)).unwrap();

        assert_eq!(original.len(), 1);
        assert_eq!(original.process(), Aggregate::Mean(100.0));
        assert_eq!(copy.process(), Aggregate::Mean(200.0));
    }
}
