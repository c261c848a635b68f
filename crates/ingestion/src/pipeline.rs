//! IngestionPipeline - turns text lines into registry updates.

use std::time::Instant;

use contracts::{CancelToken, ContractError, LineSource, Record, SensorId, SensorKind};
use registry::{Sensor, SensorRegistry};
use tracing::{debug, info, instrument, warn};

use crate::parser::{is_noise, parse_record};
use crate::stats::IngestionStats;

/// What happened to a single ingested line
#[derive(Debug)]
pub enum LineOutcome {
    /// Noise; nothing reached the registry
    Skipped,

    /// Identifier was unknown, a new sensor now holds the reading
    Registered { id: SensorId, kind: SensorKind },

    /// Reading appended to an existing sensor
    Appended {
        id: SensorId,
        kind: SensorKind,
        count: usize,
    },

    /// Record discarded; the registry is unchanged
    Rejected(ContractError),
}

impl LineOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Registered { .. } | Self::Appended { .. })
    }
}

/// Ingestion Pipeline
///
/// Stateless apart from its counters. Every per-line failure is logged,
/// counted and recovered; only transport errors end a `run`.
#[derive(Debug, Default)]
pub struct IngestionPipeline {
    stats: IngestionStats,
}

impl IngestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one line of input
    pub fn ingest_line(&mut self, registry: &mut SensorRegistry, line: &str) -> LineOutcome {
        self.stats.record_received();

        if is_noise(line) {
            debug!(line = %line, "noise line skipped");
            self.stats.record_skipped();
            return LineOutcome::Skipped;
        }

        match parse_record(line) {
            Ok(record) => self.apply(registry, record),
            Err(e) => self.reject(e),
        }
    }

    fn apply(&mut self, registry: &mut SensorRegistry, record: Record) -> LineOutcome {
        let Record {
            kind,
            sensor_id,
            reading,
        } = record;

        if let Some(sensor) = registry.lookup_mut(&sensor_id) {
            if let Err(e) = sensor.add_reading(reading) {
                return self.reject(e);
            }
            let count = sensor.len();
            let kind = sensor.kind();
            self.stats.record_accepted();
            info!(sensor_id = %sensor_id, %reading, count, "reading appended");
            return LineOutcome::Appended {
                id: sensor_id,
                kind,
                count,
            };
        }

        let sensor = registry.register(kind, sensor_id.clone());
        if let Err(e) = sensor.add_reading(reading) {
            return self.reject(e);
        }
        self.stats.record_registered();
        self.stats.record_accepted();
        info!(sensor_id = %sensor_id, kind = %kind, %reading, "sensor registered from stream");
        LineOutcome::Registered {
            id: sensor_id,
            kind,
        }
    }

    fn reject(&mut self, error: ContractError) -> LineOutcome {
        warn!(error = %error, "record rejected");
        self.stats.record_rejected(&error);
        LineOutcome::Rejected(error)
    }

    /// Read lines until the source is exhausted or `cancel` fires
    ///
    /// The returned stats are cumulative over the pipeline's lifetime.
    #[instrument(name = "ingestion_run", skip_all)]
    pub fn run<S>(
        &mut self,
        source: &mut S,
        registry: &mut SensorRegistry,
        cancel: &CancelToken,
    ) -> Result<IngestionStats, ContractError>
    where
        S: LineSource + ?Sized,
    {
        let started = Instant::now();
        info!("ingestion started");

        let result = loop {
            match source.read_line(cancel) {
                Ok(Some(line)) => {
                    info!(line = %line, "rx");
                    self.ingest_line(registry, &line);
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };

        self.stats.duration += started.elapsed();

        match result {
            Ok(()) => {
                if cancel.is_cancelled() {
                    info!(received = self.stats.lines_received, "ingestion cancelled");
                } else {
                    info!(received = self.stats.lines_received, "line source exhausted");
                }
                Ok(self.stats.clone())
            }
            Err(e) => {
                warn!(error = %e, "ingestion aborted by transport error");
                Err(e)
            }
        }
    }

    pub fn stats(&self) -> &IngestionStats {
        &self.stats
    }
}
