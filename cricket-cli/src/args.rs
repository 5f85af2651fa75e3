use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cricket_core::config::DEFAULT_OVERS;

#[derive(Parser, Debug)]
#[command(name = "cricket", version, about = "Ball-by-ball cricket scorer", long_about = None)]
pub struct Cli {
    /// Log every delivery at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a match by typing each delivery
    Play(MatchArgs),

    /// Let the computer bowl a whole match from a seed
    Simulate {
        #[command(flatten)]
        match_args: MatchArgs,

        /// Seed for the delivery generator
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct MatchArgs {
    /// Team sheet JSON: {"teams": [{"name": .., "players": [..]}, ..], "overs": n}
    #[arg(long, value_name = "FILE")]
    pub teams: Option<PathBuf>,

    /// Overs per innings; overrides the team sheet
    #[arg(long)]
    pub overs: Option<u32>,

    /// Runs awarded for a wide
    #[arg(long, default_value_t = 1)]
    pub wide_runs: u32,

    /// Runs awarded for a no-ball
    #[arg(long, default_value_t = 1)]
    pub no_ball_runs: u32,

    /// Print the final scorecard as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not ring the terminal bell on boundaries
    #[arg(long)]
    pub quiet_cue: bool,
}

impl MatchArgs {
    pub fn overs_or(&self, sheet_overs: Option<u32>) -> u32 {
        self.overs.or(sheet_overs).unwrap_or(DEFAULT_OVERS)
    }
}
