//! `ingest` command implementation.

use std::io;

use anyhow::{Context, Result};
use contracts::{ChannelParams, StationBlueprint};
use ingestion::{select_baud_rate, IngestionPipeline, LineChannel};
use registry::SensorRegistry;
use tracing::info;

use crate::cli::IngestArgs;
use crate::error::CliError;
use crate::session::{print_session, run_blocking, Interrupts};

/// Execute the `ingest` command
pub async fn run_ingest(args: &IngestArgs, blueprint: StationBlueprint) -> Result<()> {
    let address = args
        .port
        .clone()
        .or_else(|| blueprint.channel.address.clone())
        .ok_or(CliError::PortMissing)?;

    let baud = args.baud.unwrap_or(blueprint.channel.baud_rate);
    let params = ChannelParams {
        baud_rate: select_baud_rate(baud),
        ..blueprint.channel.params()
    };

    info!(address = %address, baud = params.baud_rate.as_u32(), "Connecting to serial device");

    let mut registry = SensorRegistry::from_blueprint(&blueprint);
    let interrupts = Interrupts::new();

    let (stats, registry) = run_blocking(&interrupts, move |interrupts| {
        let mut channel = LineChannel::new();
        channel
            .open(&address, &params)
            .with_context(|| format!("Failed to open serial device {address}"))?;

        println!("Connected to {address} at {}. Press Ctrl+C to stop.", params.baud_rate);

        let session = interrupts.begin();
        let stats = IngestionPipeline::new()
            .run(&mut channel, &mut registry, session.token())
            .context("Ingestion failed")?;
        Ok((stats, registry))
    })
    .await?;

    info!(
        received = stats.lines_received,
        accepted = stats.records_accepted,
        rejected = stats.rejected(),
        "Ingestion session finished"
    );
    print_session(&mut io::stdout().lock(), &stats, &registry, args.json)
}
