//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use meteor_core::constants::TICK_RATE;
use meteor_core::enums::UpdateScope;

/// Which tracked bodies each tick advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScopeArg {
    /// Every tracked body.
    #[default]
    All,
    /// Only bodies overlapping the targeting query around the ship.
    LastQuery,
}

impl From<ScopeArg> for UpdateScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::All => UpdateScope::All,
            ScopeArg::LastQuery => UpdateScope::LastQuery,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless asteroid-field targeting simulation")]
pub struct Cli {
    /// Scenario seed. Overrides the seed in the config file.
    pub seed: Option<u64>,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 10 * TICK_RATE as u64)]
    pub ticks: u64,
    /// JSON config file. Missing fields take their defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Pace ticks to wall-clock time instead of running flat out.
    #[arg(long)]
    pub realtime: bool,
    /// Print the final world snapshot as JSON.
    #[arg(long)]
    pub snapshot: bool,
    #[arg(long, value_enum, default_value_t = ScopeArg::All)]
    pub scope: ScopeArg,
}
