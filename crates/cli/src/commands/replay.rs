//! `replay` command implementation.

use std::fs::File;
use std::io;

use anyhow::{Context, Result};
use contracts::StationBlueprint;
use ingestion::{IngestionPipeline, LineChannel};
use registry::SensorRegistry;
use tracing::info;

use crate::cli::ReplayArgs;
use crate::session::{print_session, run_blocking, Interrupts};

/// Execute the `replay` command
pub async fn run_replay(args: &ReplayArgs, blueprint: StationBlueprint) -> Result<()> {
    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open capture {}", args.file.display()))?;
    let name = args.file.display().to_string();
    info!(file = %name, "Replaying capture");

    let mut registry = SensorRegistry::from_blueprint(&blueprint);
    let poll_interval = blueprint.channel.params().poll_interval;
    let interrupts = Interrupts::new();

    let (stats, registry) = run_blocking(&interrupts, move |interrupts| {
        let mut channel = LineChannel::new().with_poll_interval(poll_interval);
        channel.attach(name, file);

        let session = interrupts.begin();
        let stats = IngestionPipeline::new()
            .run(&mut channel, &mut registry, session.token())
            .context("Replay failed")?;
        Ok((stats, registry))
    })
    .await?;

    print_session(&mut io::stdout().lock(), &stats, &registry, args.json)
}
