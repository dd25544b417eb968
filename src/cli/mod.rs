//! CLI interface for tickvol
//!
//! Provides subcommands for:
//! - `estimate`: Run the Monte Carlo volatility pipeline on a tick CSV
//! - `config`: Show the effective configuration

mod estimate;

pub use estimate::EstimateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tickvol")]
#[command(about = "Monte Carlo intraday realized volatility estimator for tick-level equity data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate per-day realized volatility from a tick CSV
    Estimate(EstimateArgs),
    /// Show the effective configuration
    Config,
}
