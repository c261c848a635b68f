//! `simulate` command implementation.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use contracts::{SensorId, StationBlueprint};
use ingestion::{IngestionPipeline, LineChannel, MockTransmitter, MockTransmitterConfig};
use registry::SensorRegistry;
use tracing::info;

use crate::cli::SimulateArgs;
use crate::session::{print_session, run_blocking, Interrupts};

/// Execute the `simulate` command
pub async fn run_simulate(args: &SimulateArgs, blueprint: StationBlueprint) -> Result<()> {
    let config = transmitter_config(args, &blueprint);
    info!(
        sensors = config.sensors.len(),
        count = ?config.count,
        interval_ms = args.interval_ms,
        seed = ?config.seed,
        "Starting simulated sensor node"
    );

    let mut registry = SensorRegistry::from_blueprint(&blueprint);
    let interrupts = Interrupts::new();

    let (stats, registry) = run_blocking(&interrupts, move |interrupts| {
        let mut channel = LineChannel::new();
        channel.attach("simulator", MockTransmitter::new(config));

        let session = interrupts.begin();
        let stats = IngestionPipeline::new()
            .run(&mut channel, &mut registry, session.token())
            .context("Simulation failed")?;
        Ok((stats, registry))
    })
    .await?;

    print_session(&mut io::stdout().lock(), &stats, &registry, args.json)
}

/// Simulate the configured sensors, or the default pair when none are configured
fn transmitter_config(args: &SimulateArgs, blueprint: &StationBlueprint) -> MockTransmitterConfig {
    let mut config = MockTransmitterConfig {
        count: (args.count > 0).then_some(args.count),
        interval: Duration::from_millis(args.interval_ms),
        seed: args.seed,
        ..Default::default()
    };

    let configured: Vec<_> = blueprint
        .sensors
        .iter()
        .filter_map(|s| SensorId::new(&s.id).ok().map(|id| (s.kind, id)))
        .collect();
    if !configured.is_empty() {
        config.sensors = configured;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{SensorConfig, SensorKind};

    fn args(count: u64) -> SimulateArgs {
        SimulateArgs {
            count,
            interval_ms: 0,
            seed: Some(9),
            json: false,
        }
    }

    #[test]
    fn test_zero_count_is_unbounded() {
        let config = transmitter_config(&args(0), &StationBlueprint::default());
        assert_eq!(config.count, None);
        assert_eq!(config.sensors.len(), 2);
    }

    #[test]
    fn test_uses_configured_sensors() {
        let blueprint = StationBlueprint {
            sensors: vec![SensorConfig {
                id: "HALL-T".to_string(),
                kind: SensorKind::Thermal,
            }],
            ..Default::default()
        };
        let config = transmitter_config(&args(5), &blueprint);
        assert_eq!(config.count, Some(5));
        assert_eq!(config.sensors.len(), 1);
        assert_eq!(config.sensors[0].1, "HALL-T");
    }
}
