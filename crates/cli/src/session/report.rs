//! Session statistics and sensor reports for the terminal.

use std::io::Write;

use anyhow::{Context, Result};
use ingestion::IngestionStats;
use registry::{Aggregate, Sensor, SensorRegistry, SensorReport};
use serde::Serialize;

/// Serializable view of one finished session
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub lines_received: u64,
    pub lines_skipped: u64,
    pub records_accepted: u64,
    pub sensors_registered: u64,
    pub format_errors: u64,
    pub variant_mismatches: u64,
    pub unknown_kinds: u64,
    pub duration_ms: u64,
    pub acceptance_rate: f64,
    pub sensors: Vec<SensorReport>,
}

impl SessionSummary {
    pub fn new(stats: &IngestionStats, registry: &SensorRegistry) -> Self {
        Self {
            lines_received: stats.lines_received,
            lines_skipped: stats.lines_skipped,
            records_accepted: stats.records_accepted,
            sensors_registered: stats.sensors_registered,
            format_errors: stats.format_errors,
            variant_mismatches: stats.variant_mismatches,
            unknown_kinds: stats.unknown_kinds,
            duration_ms: stats.duration.as_millis() as u64,
            acceptance_rate: stats.acceptance_rate(),
            sensors: registry.reports(),
        }
    }
}

/// Write the outcome of an ingestion session
pub fn print_session<W>(
    out: &mut W,
    stats: &IngestionStats,
    registry: &SensorRegistry,
    json: bool,
) -> Result<()>
where
    W: Write + ?Sized,
{
    if json {
        let summary = SessionSummary::new(stats, registry);
        let json = serde_json::to_string_pretty(&summary)
            .context("Failed to serialize session summary")?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    writeln!(out, "\n{stats}\n")?;
    print_aggregates(out, registry)?;
    Ok(())
}

/// One line per sensor with its aggregate
fn print_aggregates<W>(out: &mut W, registry: &SensorRegistry) -> Result<()>
where
    W: Write + ?Sized,
{
    if registry.is_empty() {
        writeln!(out, "No sensors registered.")?;
        return Ok(());
    }

    writeln!(out, "=== Processing {} sensor(s) ===", registry.len())?;
    for sensor in registry.iter() {
        let line = aggregate_line(sensor.kind().as_str(), sensor.id(), &sensor.process());
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn aggregate_line(kind: &str, id: &str, aggregate: &Aggregate) -> String {
    format!("  [{kind}] {id}: {aggregate}")
}
