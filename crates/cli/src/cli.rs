//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Sensor Station - serial telemetry ingestion for thermal and barometric sensors
#[derive(Parser, Debug)]
#[command(
    name = "sensor-station",
    author,
    version,
    about = "Serial sensor telemetry station",
    long_about = "Ingests '<T|P> <id> <value>' records from a microcontroller over a serial\n\
                  line, registers sensors on first sight and reports per-sensor aggregates:\n\
                  the minimum for thermal sensors and the mean for barometric sensors."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "SENSOR_STATION_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Station configuration file (TOML or JSON)
    #[arg(short, long, global = true, env = "SENSOR_STATION_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Ingest from a serial device until Ctrl+C
    Ingest(IngestArgs),

    /// Ingest a captured log file until end of file
    Replay(ReplayArgs),

    /// Ingest from a simulated sensor node
    Simulate(SimulateArgs),

    /// Validate the configuration file without running
    Validate(ValidateArgs),
}

/// Arguments for the `ingest` command
#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    /// Serial device path, overrides `channel.address`
    #[arg(short, long, env = "SENSOR_STATION_PORT")]
    pub port: Option<String>,

    /// Baud rate (9600, 19200, 38400, 57600, 115200), overrides `channel.baud_rate`
    #[arg(short, long, env = "SENSOR_STATION_BAUD")]
    pub baud: Option<u32>,

    /// Print the session result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `replay` command
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Captured serial log
    #[arg(short, long)]
    pub file: PathBuf,

    /// Print the session result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `simulate` command
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of records to emit (0 = until Ctrl+C)
    #[arg(short = 'n', long, default_value = "20", env = "SENSOR_STATION_SIM_COUNT")]
    pub count: u64,

    /// Delay between records in milliseconds
    #[arg(long, default_value = "1000", env = "SENSOR_STATION_SIM_INTERVAL_MS")]
    pub interval_ms: u64,

    /// Random seed for a reproducible stream
    #[arg(long, env = "SENSOR_STATION_SIM_SEED")]
    pub seed: Option<u64>,

    /// Print the session result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}
