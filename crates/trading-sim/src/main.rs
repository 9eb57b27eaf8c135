//! Replay a command script through the trading simulator.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use trading_core::TradingDesk;
use trading_sim::{config, logging, runner};

#[derive(Parser)]
#[clap(name = "trading-sim")]
#[clap(about = "Replay trading commands against an in-memory market")]
struct Cli {
    /// Command script to replay (reads stdin when omitted)
    #[clap(short, long)]
    script: Option<PathBuf>,

    /// TOML market configuration
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Simulator seed, overrides config and TRADING_SEED
    #[clap(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.debug);

    let mut market = config::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        market.seed = cli.seed;
    }

    info!(
        instruments = market.instruments.len(),
        seed = ?market.seed,
        history_limit = market.history_limit,
        "starting trading-sim"
    );

    let mut desk = TradingDesk::from_config(&market).context("building market")?;
    let stdout = io::stdout();

    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening script {}", path.display()))?;
            runner::run_script(&mut desk, BufReader::new(file), stdout.lock())?
        }
        None => runner::run_script(&mut desk, io::stdin().lock(), stdout.lock())?,
    };

    info!(
        commands = summary.commands,
        responses = summary.responses,
        rejections = summary.rejections,
        unparsed = summary.unparsed,
        trades = desk.engine().log().len(),
        "replay finished"
    );

    Ok(())
}
