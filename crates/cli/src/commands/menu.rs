//! `menu` command: interactive loop over stdin.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use contracts::{ChannelConfig, ChannelParams, Reading, SensorId, SensorKind, StationBlueprint};
use ingestion::{select_baud_rate, IngestionPipeline, LineChannel};
use registry::{Sensor, SensorRegistry};
use tracing::{info, warn};

use crate::error::CliError;
use crate::session::{print_session, run_blocking, Interrupts};

const MENU: &str = "\
========== Sensor Station ==========
1. Register thermal sensor
2. Register barometric sensor
3. Add manual reading
4. Process all sensors
5. Exit
6. Connect serial device and ingest
7. List sensor reports
====================================";

/// Execute the `menu` command
pub async fn run_menu(blueprint: StationBlueprint) -> Result<()> {
    let interrupts = Interrupts::new();

    run_blocking(&interrupts, move |interrupts| {
        let stdin = io::stdin();
        let mut menu = Menu::new(
            stdin.lock(),
            io::stdout(),
            SensorRegistry::from_blueprint(&blueprint),
            blueprint.channel,
        )
        .with_interrupts(interrupts);
        menu.run()
    })
    .await
}

/// Menu state over any line input and text output
pub struct Menu<R, W> {
    input: R,
    output: W,
    registry: SensorRegistry,
    channel: ChannelConfig,
    interrupts: Interrupts,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, output: W, registry: SensorRegistry, channel: ChannelConfig) -> Self {
        Self {
            input,
            output,
            registry,
            channel,
            interrupts: Interrupts::new(),
        }
    }

    pub fn with_interrupts(mut self, interrupts: Interrupts) -> Self {
        self.interrupts = interrupts;
        self
    }

    /// Loop until option 5 or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{MENU}")?;
            let Some(choice) = self.prompt("Select an option: ")? else {
                break;
            };

            let outcome = match choice.as_str() {
                "1" => self.register(SensorKind::Thermal),
                "2" => self.register(SensorKind::Barometric),
                "3" => self.add_manual_reading(),
                "4" => self.process_all(),
                "5" => break,
                "6" => self.connect_and_ingest(),
                "7" => self.list_reports(),
                other => Err(CliError::invalid_input(format!("Invalid option '{other}'")).into()),
            };

            if let Err(e) = outcome {
                // io failures on the terminal end the menu
                if e.downcast_ref::<io::Error>().is_some() {
                    return Err(e);
                }
                writeln!(self.output, "Error: {e}")?;
            }
        }

        writeln!(self.output, "Releasing {} sensor(s). Bye.", self.registry.len())?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt that treats end of input as a usage error
    fn require(&mut self, label: &str) -> Result<String> {
        self.prompt(label)?
            .ok_or_else(|| CliError::invalid_input("Unexpected end of input").into())
    }

    fn register(&mut self, kind: SensorKind) -> Result<()> {
        let raw = self.require("Sensor id: ")?;
        let id = SensorId::new(&raw).map_err(CliError::from)?;

        if self.registry.lookup(&id).is_some() {
            return Err(CliError::invalid_input(format!("Sensor '{id}' already exists")).into());
        }

        self.registry.register(kind, id.clone());
        info!(sensor_id = %id, kind = %kind, "Sensor registered from menu");
        writeln!(self.output, "Registered {kind} sensor '{id}'.")?;
        Ok(())
    }

    fn add_manual_reading(&mut self) -> Result<()> {
        let id = self.require("Sensor id: ")?;
        let kind = self
            .registry
            .lookup(&id)
            .map(|s| s.kind())
            .ok_or_else(|| CliError::invalid_input(format!("Sensor '{id}' not found")))?;

        let raw = self.require(&format!("Value ({}): ", kind.unit()))?;
        let reading = Reading::parse(kind, &raw).map_err(CliError::from)?;

        let count = self
            .registry
            .add_reading(&id, reading)
            .map_err(CliError::from)?
            .len();
        writeln!(self.output, "Stored {reading} for '{id}' ({count} reading(s)).")?;
        Ok(())
    }

    fn process_all(&mut self) -> Result<()> {
        if self.registry.is_empty() {
            writeln!(self.output, "No sensors registered.")?;
            return Ok(());
        }

        for (id, aggregate) in self.registry.process_all() {
            writeln!(self.output, "  {id}: {aggregate}")?;
        }
        Ok(())
    }

    fn list_reports(&mut self) -> Result<()> {
        if self.registry.is_empty() {
            writeln!(self.output, "No sensors registered.")?;
            return Ok(());
        }

        for report in self.registry.reports() {
            writeln!(self.output, "{report}")?;
        }
        Ok(())
    }

    fn connect_and_ingest(&mut self) -> Result<()> {
        let default_address = self.channel.address.clone().unwrap_or_default();
        let address = match self.require(&format!("Serial port [{default_address}]: "))? {
            a if a.is_empty() => default_address,
            a => a,
        };
        if address.is_empty() {
            return Err(CliError::PortMissing.into());
        }

        let baud = match self.require(&format!("Baud rate [{}]: ", self.channel.baud_rate))? {
            b if b.is_empty() => self.channel.baud_rate,
            b => b
                .parse::<u32>()
                .map_err(|_| CliError::invalid_input(format!("Invalid baud rate '{b}'")))?,
        };

        let params = ChannelParams {
            baud_rate: select_baud_rate(baud),
            ..self.channel.params()
        };

        let mut channel = LineChannel::new();
        if let Err(e) = channel.open(&address, &params) {
            warn!(error = %e, "Serial connection failed");
            writeln!(self.output, "Connection failed: {e}")?;
            return Ok(());
        }

        writeln!(
            self.output,
            "Connected to {address} at {}. Press Ctrl+C to stop.",
            params.baud_rate
        )?;

        let session = self.interrupts.begin();
        let result =
            IngestionPipeline::new().run(&mut channel, &mut self.registry, session.token());
        drop(session);
        channel.close();

        match result {
            Ok(stats) => print_session(&mut self.output, &stats, &self.registry, false)?,
            Err(e) => writeln!(self.output, "Ingestion stopped: {e}")?,
        }
        Ok(())
    }
}
