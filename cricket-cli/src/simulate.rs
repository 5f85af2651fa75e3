//! Computer-scored matches driven by a seeded generator.

use anyhow::{Context, Result};
use cricket_core::{Delivery, DismissalKind, MatchConfig, MatchState, Phase, TeamInfo};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Rough club-cricket mix of outcomes. The wicket slot picks its kind separately.
const DELIVERY_WEIGHTS: [(Delivery, u32); 11] = [
    (Delivery::Dot, 32),
    (Delivery::One, 26),
    (Delivery::Two, 8),
    (Delivery::Three, 1),
    (Delivery::Four, 10),
    (Delivery::Six, 4),
    (Delivery::Wide, 3),
    (Delivery::NoBall, 1),
    (Delivery::Wicket(DismissalKind::Bowled), 5),
    (Delivery::Bye(1), 1),
    (Delivery::LegBye(1), 2),
];

/// What a simulated match produced.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub seed: u64,
    pub deliveries: u32,
    pub boundaries: u32,
    pub state: MatchState,
}

struct Bowling {
    rng: StdRng,
    weights: WeightedIndex<u32>,
}

impl Bowling {
    fn new(seed: u64) -> Result<Self> {
        let weights = WeightedIndex::new(DELIVERY_WEIGHTS.iter().map(|(_, w)| *w))
            .context("building delivery weights")?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            weights,
        })
    }

    fn delivery(&mut self) -> Delivery {
        match DELIVERY_WEIGHTS[self.weights.sample(&mut self.rng)].0 {
            Delivery::Wicket(_) => {
                let kind = DismissalKind::ALL
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(DismissalKind::Bowled);
                Delivery::Wicket(kind)
            }
            Delivery::Bye(_) => Delivery::Bye(self.rng.random_range(1..=4)),
            Delivery::LegBye(_) => Delivery::LegBye(self.rng.random_range(1..=2)),
            other => other,
        }
    }

    fn pick(&mut self, choices: &[usize], what: &str) -> Result<usize> {
        choices
            .choose(&mut self.rng)
            .copied()
            .with_context(|| format!("no {what} to choose from"))
    }
}

/// Play a whole match from toss to result.
pub fn simulate_match(
    teams: [TeamInfo; 2],
    config: MatchConfig,
    seed: u64,
) -> Result<SimulationReport> {
    let mut bowling = Bowling::new(seed)?;
    let [first, second] = teams;
    let mut state = MatchState::new().setup_match(first, second, config)?;
    let mut deliveries = 0;
    let mut boundaries = 0;

    while state.phase != Phase::Result {
        let awaiting_batsman = state.current().is_some_and(|inn| inn.needs_new_batsman);
        state = match state.phase {
            Phase::Toss => {
                let winner = bowling.rng.random_range(0..2);
                let bat = bowling.rng.random_bool(0.5);
                state.record_toss(winner, bat)?
            }
            Phase::SelectBatting => {
                let pair: Vec<usize> = state
                    .available_batsmen()
                    .choose_multiple(&mut bowling.rng, 2)
                    .copied()
                    .collect();
                let openers = match pair.as_slice() {
                    [a, b] => [*a, *b],
                    _ => anyhow::bail!("fewer than two batsmen available"),
                };
                state.select_openers(openers)?
            }
            Phase::Playing | Phase::NewBowler if awaiting_batsman => {
                let next = bowling.pick(&state.available_batsmen(), "batsmen")?;
                state.select_new_batsman(next)?
            }
            Phase::SelectBowling | Phase::NewBowler => {
                let bowler = bowling.pick(&state.eligible_bowlers(), "bowlers")?;
                state.select_bowler(bowler)?
            }
            Phase::Playing => {
                let delivery = bowling.delivery();
                deliveries += 1;
                if delivery.is_boundary() {
                    boundaries += 1;
                }
                debug!(?delivery, "simulated delivery");
                state.score_delivery(delivery)?
            }
            Phase::InningsBreak => state.start_second_innings()?,
            Phase::Setup | Phase::Result => break,
        };
    }

    info!(seed, deliveries, boundaries, "simulation finished");
    Ok(SimulationReport {
        seed,
        deliveries,
        boundaries,
        state,
    })
}
