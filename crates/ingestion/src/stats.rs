//! Ingestion session counters

use std::fmt;
use std::time::Duration;

use contracts::ContractError;

/// Counters for one ingestion session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestionStats {
    /// Non-empty lines handed to the pipeline
    pub lines_received: u64,

    /// Banner and other noise lines
    pub lines_skipped: u64,

    /// Readings stored in the registry
    pub records_accepted: u64,

    /// Sensors created from the stream
    pub sensors_registered: u64,

    /// Malformed records (token count, identifier, value)
    pub format_errors: u64,

    /// Readings whose kind differs from the registered sensor
    pub variant_mismatches: u64,

    /// Records with an unrecognised type tag
    pub unknown_kinds: u64,

    /// Wall time spent inside `run`
    pub duration: Duration,
}

impl IngestionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&mut self) {
        self.lines_received += 1;
    }

    pub fn record_skipped(&mut self) {
        self.lines_skipped += 1;
    }

    pub fn record_accepted(&mut self) {
        self.records_accepted += 1;
    }

    pub fn record_registered(&mut self) {
        self.sensors_registered += 1;
    }

    /// Count a rejected line under its error class
    pub fn record_rejected(&mut self, error: &ContractError) {
        match error {
            ContractError::VariantMismatch { .. } => self.variant_mismatches += 1,
            ContractError::UnknownKind { .. } => self.unknown_kinds += 1,
            _ => self.format_errors += 1,
        }
    }

    /// Total rejected lines
    pub fn rejected(&self) -> u64 {
        self.format_errors + self.variant_mismatches + self.unknown_kinds
    }

    /// Accepted share of non-noise lines, 0.0 when nothing was received
    pub fn acceptance_rate(&self) -> f64 {
        let candidates = self.lines_received.saturating_sub(self.lines_skipped);
        if candidates == 0 {
            return 0.0;
        }
        self.records_accepted as f64 / candidates as f64
    }

    /// Lines per second over the session
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.lines_received as f64 / secs
    }
}

impl fmt::Display for IngestionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Ingestion Summary ===")?;
        writeln!(f, "Duration:            {:.2}s", self.duration.as_secs_f64())?;
        writeln!(f, "Lines received:      {}", self.lines_received)?;
        writeln!(f, "Lines skipped:       {}", self.lines_skipped)?;
        writeln!(f, "Records accepted:    {}", self.records_accepted)?;
        writeln!(f, "Sensors registered:  {}", self.sensors_registered)?;
        writeln!(f, "Rejected:            {}", self.rejected())?;
        writeln!(f, "  format errors:     {}", self.format_errors)?;
        writeln!(f, "  variant mismatch:  {}", self.variant_mismatches)?;
        writeln!(f, "  unknown kind:      {}", self.unknown_kinds)?;
        writeln!(f, "Acceptance rate:     {:.1}%", self.acceptance_rate() * 100.0)?;
        write!(f, "Throughput:          {:.1} lines/s", self.throughput())
    }
}
