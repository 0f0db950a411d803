//! Runs a companion follow scenario headlessly and prints a summary.
//!
//! Run with: `cargo run -p runtime --bin follow-sim -- <scenario.ron>`

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use follow_content::{ConfigLoader, ScenarioLoader};
use follow_core::FollowConfig;
use runtime::Simulation;

/// Companion follow simulator
#[derive(Parser)]
#[command(name = "follow-sim")]
#[command(about = "Run a companion follow scenario", long_about = None)]
#[command(version)]
struct Cli {
    /// Scenario file (RON)
    scenario: PathBuf,

    /// Follow tuning file (TOML); falls back to FOLLOW_CONFIG
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run instead of the scenario's own count
    #[arg(short, long)]
    ticks: Option<u64>,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    runtime::logging::init()?;

    let cli = Cli::parse();

    let config_path = cli
        .config
        .or_else(|| std::env::var_os("FOLLOW_CONFIG").map(PathBuf::from));
    let config = match config_path {
        Some(path) => ConfigLoader::load(&path)?,
        None => FollowConfig::default(),
    };

    let scenario = ScenarioLoader::load(&cli.scenario)?;
    let ticks = cli.ticks.unwrap_or(scenario.ticks);

    let mut simulation = Simulation::from_scenario(&scenario, config)?;
    tracing::info!(ticks, scenario = %cli.scenario.display(), "running scenario");
    let report = simulation.run(ticks);

    println!("{report}");
    Ok(())
}
