//! SensorRegistry - every known sensor, owned in registration order.

use contracts::{ContractError, Reading, SensorId, SensorKind, StationBlueprint};
use tracing::{debug, info, instrument, warn};

use crate::record::SensorRecord;
use crate::sensor::{Aggregate, Sensor, SensorReport};
use crate::sequence::OwningSequence;

/// Owning collection of sensor records
///
/// The registry does not reject duplicate identifiers. Callers look up an
/// identifier before registering it; if they skip that step, [`lookup`](Self::lookup)
/// only ever returns the first record with the identifier.
#[derive(Debug, Clone, Default)]
pub struct SensorRegistry {
    sensors: OwningSequence<SensorRecord>,
}

impl SensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry pre-populated with the blueprint's sensors
    ///
    /// Entries whose id is invalid or already registered are skipped with a warning.
    #[instrument(
        name = "registry_from_blueprint",
        skip(blueprint),
        fields(sensors = blueprint.sensors.len())
    )]
    pub fn from_blueprint(blueprint: &StationBlueprint) -> Self {
        let mut registry = Self::new();

        for entry in &blueprint.sensors {
            let id = match SensorId::new(&entry.id) {
                Ok(id) => id,
                Err(e) => {
                    warn!(error = %e, "skipping configured sensor");
                    continue;
                }
            };

            if registry.lookup(&id).is_some() {
                warn!(sensor_id = %id, "duplicate configured sensor, skipping");
                continue;
            }

            registry.register(entry.kind, id);
        }

        info!(count = registry.len(), "registry initialized from blueprint");
        registry
    }

    /// First sensor with exactly this identifier (case-sensitive)
    pub fn lookup(&self, id: &str) -> Option<&SensorRecord> {
        self.sensors.find_by(|s| s.id().as_str() == id)
    }

    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut SensorRecord> {
        self.sensors.find_by_mut(|s| s.id().as_str() == id)
    }

    /// Append a sensor record without checking for duplicates
    pub fn register_sensor(&mut self, record: SensorRecord) -> &mut SensorRecord {
        debug!(sensor_id = %record.id(), kind = %record.kind(), "sensor registered");
        self.sensors.append_mut(record)
    }

    /// Register an empty sensor of `kind`
    pub fn register(&mut self, kind: SensorKind, id: SensorId) -> &mut SensorRecord {
        self.register_sensor(SensorRecord::new(kind, id))
    }

    /// Manual-entry path: append a reading to an existing sensor
    pub fn add_reading(
        &mut self,
        id: &str,
        reading: Reading,
    ) -> Result<&SensorRecord, ContractError> {
        let record = self
            .lookup_mut(id)
            .ok_or_else(|| ContractError::SensorNotFound {
                sensor_id: id.to_string(),
            })?;
        record.add_reading(reading)?;
        Ok(record)
    }

    /// Apply `op` to every sensor in registration order
    pub fn for_each_sensor<F>(&self, op: F)
    where
        F: FnMut(&SensorRecord),
    {
        self.sensors.for_each(op);
    }

    /// Run `process` on every sensor
    pub fn process_all(&self) -> Vec<(SensorId, Aggregate)> {
        let mut results = Vec::with_capacity(self.len());
        self.for_each_sensor(|s| results.push((s.id().clone(), s.process())));
        results
    }

    /// One report per sensor, in registration order
    pub fn reports(&self) -> Vec<SensorReport> {
        self.sensors.iter().map(|s| s.report()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SensorRecord> + '_ {
        self.sensors.iter()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Total readings across all sensors
    pub fn total_readings(&self) -> usize {
        self.sensors.iter().map(|s| s.len()).sum()
    }
}

impl Drop for SensorRegistry {
    fn drop(&mut self) {
        if !self.sensors.is_empty() {
            debug!(
                sensors = self.sensors.len(),
                readings = self.total_readings(),
                "releasing sensor registry"
            );
        }
    }
}
