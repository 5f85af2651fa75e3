//! Per-innings records: batting and bowling figures and the over log.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::delivery::{
    legal_balls, over_runs, BallEvent, DeliveryOutcome, DismissalKind, BALLS_PER_OVER,
};
use crate::team::{other_team, TeamIndex};

/// How and to whom a batsman was dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dismissal {
    pub kind: DismissalKind,
    pub bowler: String,
}

/// One player's batting for one innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatsmanStats {
    pub name: String,
    pub player_index: usize,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub is_out: bool,
    pub dismissal: Option<Dismissal>,
}

impl BatsmanStats {
    pub fn new(name: impl Into<String>, player_index: usize) -> Self {
        Self {
            name: name.into(),
            player_index,
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            dismissal: None,
        }
    }
}

/// One player's bowling for one innings, kept across spells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerStats {
    pub name: String,
    pub player_index: usize,
    /// Completed overs.
    pub overs_bowled: u32,
    /// Legal balls in the over currently being bowled.
    pub balls_bowled: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub maidens: u32,
}

impl BowlerStats {
    pub fn new(name: impl Into<String>, player_index: usize) -> Self {
        Self {
            name: name.into(),
            player_index,
            overs_bowled: 0,
            balls_bowled: 0,
            runs_conceded: 0,
            wickets: 0,
            maidens: 0,
        }
    }
}

/// What a single delivery did to the innings beyond the running totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryEffect {
    /// The last available wicket fell; the over was left unarchived.
    pub all_out: bool,
    /// The over that this delivery completed, already archived.
    pub completed_over: Option<Vec<BallEvent>>,
}

/// The full record of one innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsData {
    pub batting_team: TeamIndex,
    pub score: u32,
    pub wickets: u32,
    /// Legal deliveries only.
    pub total_balls: u32,
    pub overs: Vec<Vec<BallEvent>>,
    pub current_over: Vec<BallEvent>,
    pub batsmen: Vec<BatsmanStats>,
    pub bowlers: Vec<BowlerStats>,
    /// Index into `batsmen`.
    pub striker: usize,
    /// Index into `batsmen`.
    pub non_striker: usize,
    /// Index into `bowlers`; unset until the first bowler is chosen.
    pub current_bowler: Option<usize>,
    pub needs_new_batsman: bool,
}

impl InningsData {
    /// Open an innings with two batsmen at the crease; the first takes strike.
    pub fn new(
        batting_team: TeamIndex,
        striker: BatsmanStats,
        non_striker: BatsmanStats,
    ) -> Self {
        Self {
            batting_team,
            score: 0,
            wickets: 0,
            total_balls: 0,
            overs: Vec::new(),
            current_over: Vec::new(),
            batsmen: vec![striker, non_striker],
            bowlers: Vec::new(),
            striker: 0,
            non_striker: 1,
            current_bowler: None,
            needs_new_batsman: false,
        }
    }

    pub fn bowling_team(&self) -> TeamIndex {
        other_team(self.batting_team)
    }

    pub fn striker(&self) -> Option<&BatsmanStats> {
        self.batsmen.get(self.striker)
    }

    pub fn non_striker(&self) -> Option<&BatsmanStats> {
        self.batsmen.get(self.non_striker)
    }

    pub fn current_bowler(&self) -> Option<&BowlerStats> {
        self.current_bowler.and_then(|idx| self.bowlers.get(idx))
    }

    pub fn has_batted(&self, player_index: usize) -> bool {
        self.batsmen.iter().any(|b| b.player_index == player_index)
    }

    /// Runs not credited to any batsman.
    pub fn extras(&self) -> u32 {
        self.overs
            .iter()
            .flatten()
            .chain(self.current_over.iter())
            .map(|b| b.extras)
            .sum()
    }

    pub fn legal_balls_in_current_over(&self) -> u32 {
        legal_balls(&self.current_over)
    }

    pub fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    /// Make `player_index` the current bowler, reusing their figures from
    /// an earlier spell when they have one.
    pub fn set_bowler(&mut self, name: &str, player_index: usize) {
        let slot = match self
            .bowlers
            .iter()
            .position(|b| b.player_index == player_index)
        {
            Some(slot) => slot,
            None => {
                self.bowlers.push(BowlerStats::new(name, player_index));
                self.bowlers.len() - 1
            }
        };
        self.current_bowler = Some(slot);
    }

    /// Send a new batsman in at the striker's end.
    pub fn bring_in_batsman(&mut self, name: &str, player_index: usize) {
        self.batsmen.push(BatsmanStats::new(name, player_index));
        self.striker = self.batsmen.len() - 1;
        self.needs_new_batsman = false;
    }

    /// Apply one delivery's outcome: totals, figures, the event log, strike
    /// rotation and over completion.
    ///
    /// `all_out_wickets` is the wicket count that ends the innings. When it is
    /// reached the delivery stays in `current_over` and no over is archived.
    pub fn apply_delivery(
        &mut self,
        outcome: &DeliveryOutcome,
        all_out_wickets: u32,
    ) -> DeliveryEffect {
        let mut effect = DeliveryEffect::default();
        let bowler_slot = self.current_bowler.unwrap_or_default();
        let bowler_name = self
            .bowlers
            .get(bowler_slot)
            .map(|b| b.name.clone())
            .unwrap_or_default();

        self.score += outcome.total_runs;

        if let Some(striker) = self.batsmen.get_mut(self.striker) {
            if outcome.legal {
                striker.balls += 1;
            }
            if outcome.dismissal.is_none() && !outcome.is_wide && !outcome.is_no_ball {
                striker.runs += outcome.batsman_runs;
                match outcome.batsman_runs {
                    4 => striker.fours += 1,
                    6 => striker.sixes += 1,
                    _ => {}
                }
            }
            if let Some(kind) = outcome.dismissal {
                striker.is_out = true;
                striker.dismissal = Some(Dismissal {
                    kind,
                    bowler: bowler_name,
                });
            }
        }

        if let Some(bowler) = self.bowlers.get_mut(bowler_slot) {
            if outcome.legal {
                bowler.balls_bowled += 1;
            }
            bowler.runs_conceded += outcome.total_runs;
            if outcome.dismissal.is_some() {
                bowler.wickets += 1;
            }
        }

        self.current_over.push(outcome.to_ball_event());
        if outcome.legal {
            self.total_balls += 1;
        }

        debug!(
            label = %outcome.label,
            score = self.score,
            wickets = self.wickets + u32::from(outcome.dismissal.is_some()),
            balls = self.total_balls,
            "delivery recorded"
        );

        if outcome.dismissal.is_some() {
            self.wickets += 1;
            if self.wickets >= all_out_wickets {
                effect.all_out = true;
                return effect;
            }
            self.needs_new_batsman = true;
        }

        if outcome.rotates_strike() {
            self.swap_strike();
        }

        if self.legal_balls_in_current_over() >= BALLS_PER_OVER {
            let over = std::mem::take(&mut self.current_over);
            if let Some(bowler) = self.bowlers.get_mut(bowler_slot) {
                bowler.overs_bowled += 1;
                bowler.balls_bowled = 0;
                if over_runs(&over) == 0 {
                    bowler.maidens += 1;
                }
            }
            if outcome.dismissal.is_none() {
                self.swap_strike();
            }
            self.overs.push(over.clone());
            effect.completed_over = Some(over);
        }

        effect
    }
}
