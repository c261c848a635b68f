//! # Sensor Station CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 交互式菜单
//! - 串口 / 回放 / 模拟数据的接入
//! - 配置验证

mod cli;
mod commands;
mod error;
mod session;
mod settings;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use observability::ObservabilityConfig;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_ingest, run_menu, run_replay, run_simulate, run_validate};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_logging(&cli)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Sensor Station starting"
    );

    let result = execute(&cli).await;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "Command failed");
    }

    result
}

async fn execute(cli: &Cli) -> Result<()> {
    let config = cli.config.as_deref();

    match &cli.command {
        Some(Commands::Validate(args)) => run_validate(args, config),
        Some(Commands::Ingest(args)) => run_ingest(args, settings::load_blueprint(config)?).await,
        Some(Commands::Replay(args)) => run_replay(args, settings::load_blueprint(config)?).await,
        Some(Commands::Simulate(args)) => {
            run_simulate(args, settings::load_blueprint(config)?).await
        }
        Some(Commands::Menu) | None => run_menu(settings::load_blueprint(config)?).await,
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let config = ObservabilityConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_format(cli.log_format.into())
        .with_ansi(std::io::stderr().is_terminal());
    observability::init_with_config(config)
}
