mod args;
mod console;
mod render;
mod simulate;
mod sound;
mod teams;
mod telemetry;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use cricket_core::config::OVER_CHOICES;
use cricket_core::cue::{SilentSink, ToneSink};
use cricket_core::{MatchConfig, MatchState, Scorecard, ScoringRules, TeamInfo};
use tracing::{info, warn};

use crate::args::{Cli, Commands, MatchArgs};
use crate::console::Console;
use crate::sound::BellSink;

fn match_setup(args: &MatchArgs) -> Result<([TeamInfo; 2], MatchConfig)> {
    let sheet = teams::load_or_default(args.teams.as_deref())?;
    let config = MatchConfig {
        overs_per_innings: args.overs_or(sheet.overs),
        rules: ScoringRules {
            wide_runs: args.wide_runs,
            no_ball_runs: args.no_ball_runs,
        },
    };
    config.validate().context("invalid match settings")?;
    if !OVER_CHOICES.contains(&config.overs_per_innings) {
        warn!(
            overs = config.overs_per_innings,
            standard = ?OVER_CHOICES,
            "non-standard innings length"
        );
    }
    Ok((sheet.into_pair()?, config))
}

fn print_card(state: &MatchState, json: bool) -> Result<()> {
    let card = Scorecard::from_state(state);
    if json {
        println!("{}", card.to_json()?);
    } else if !card.innings.is_empty() {
        print!("{}", render::scorecard(&card));
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Commands::Play(args) => {
            let (teams, config) = match_setup(&args)?;
            info!(
                home = %teams[0].name,
                away = %teams[1].name,
                overs = config.overs_per_innings,
                "scoring session started"
            );
            let mut bell;
            let mut silent = SilentSink;
            let sink: &mut dyn ToneSink = if args.quiet_cue {
                &mut silent
            } else {
                bell = BellSink::stderr();
                &mut bell
            };
            let state = Console::new(teams, config, sink).run(io::stdin().lock(), io::stdout())?;
            print_card(&state, args.json)?;
        }
        Commands::Simulate { match_args, seed } => {
            let (teams, config) = match_setup(&match_args)?;
            let report = simulate::simulate_match(teams, config, seed)?;
            if !match_args.json {
                println!(
                    "seed {}: {} deliveries, {} boundaries",
                    report.seed, report.deliveries, report.boundaries
                );
            }
            print_card(&report.state, match_args.json)?;
        }
    }

    Ok(())
}
