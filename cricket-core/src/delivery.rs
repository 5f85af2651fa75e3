//! Deliveries and the ball-by-ball event log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ScoringRules;

/// Legal deliveries in a completed over.
pub const BALLS_PER_OVER: u32 = 6;

/// Range of runs a bye or leg-bye can record.
pub const MIN_EXTRA_RUNS: u8 = 1;
pub const MAX_EXTRA_RUNS: u8 = 4;

/// How a batsman was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DismissalKind {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    CaughtBehind,
}

impl DismissalKind {
    pub const ALL: [DismissalKind; 7] = [
        DismissalKind::Bowled,
        DismissalKind::Caught,
        DismissalKind::Lbw,
        DismissalKind::RunOut,
        DismissalKind::Stumped,
        DismissalKind::HitWicket,
        DismissalKind::CaughtBehind,
    ];
}

impl fmt::Display for DismissalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DismissalKind::Bowled => "bowled",
            DismissalKind::Caught => "caught",
            DismissalKind::Lbw => "lbw",
            DismissalKind::RunOut => "run out",
            DismissalKind::Stumped => "stumped",
            DismissalKind::HitWicket => "hit wicket",
            DismissalKind::CaughtBehind => "caught behind",
        };
        write!(f, "{}", label)
    }
}

/// What the scorer records for one delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Delivery {
    Dot,
    One,
    Two,
    Three,
    Four,
    Six,
    Wide,
    NoBall,
    Wicket(DismissalKind),
    /// Runs taken without the bat touching the ball. One to four runs.
    Bye(u8),
    /// Runs taken off the batsman's body. One to four runs.
    LegBye(u8),
}

impl Delivery {
    /// Wides and no-balls are re-bowled and never count toward the over.
    pub fn is_legal(&self) -> bool {
        !matches!(self, Delivery::Wide | Delivery::NoBall)
    }

    /// Fours and sixes, the deliveries that earn a celebration.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Delivery::Four | Delivery::Six)
    }

    /// Resolve this delivery into runs and flags under `rules`.
    pub fn outcome(&self, rules: &ScoringRules) -> DeliveryOutcome {
        let (total_runs, batsman_runs) = match self {
            Delivery::Dot | Delivery::Wicket(_) => (0, 0),
            Delivery::One => (1, 1),
            Delivery::Two => (2, 2),
            Delivery::Three => (3, 3),
            Delivery::Four => (4, 4),
            Delivery::Six => (6, 6),
            Delivery::Wide => (rules.wide_runs, 0),
            Delivery::NoBall => (rules.no_ball_runs, 0),
            Delivery::Bye(runs) | Delivery::LegBye(runs) => {
                (u32::from((*runs).clamp(MIN_EXTRA_RUNS, MAX_EXTRA_RUNS)), 0)
            }
        };

        let label = match self {
            Delivery::Dot => "•".to_string(),
            Delivery::Wide => "WD".to_string(),
            Delivery::NoBall => "NB".to_string(),
            Delivery::Wicket(_) => "W".to_string(),
            Delivery::Bye(_) => format!("{}B", total_runs),
            Delivery::LegBye(_) => format!("{}LB", total_runs),
            _ => total_runs.to_string(),
        };

        DeliveryOutcome {
            total_runs,
            batsman_runs,
            extras: total_runs - batsman_runs,
            legal: self.is_legal(),
            is_wide: matches!(self, Delivery::Wide),
            is_no_ball: matches!(self, Delivery::NoBall),
            dismissal: match self {
                Delivery::Wicket(kind) => Some(*kind),
                _ => None,
            },
            label,
        }
    }
}

/// A delivery resolved into the numbers the scorer applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub total_runs: u32,
    pub batsman_runs: u32,
    pub extras: u32,
    pub legal: bool,
    pub is_wide: bool,
    pub is_no_ball: bool,
    pub dismissal: Option<DismissalKind>,
    pub label: String,
}

impl DeliveryOutcome {
    /// Batsmen cross on an odd number of runs actually run. Byes and
    /// leg-byes count; wides, no-balls and wickets never rotate strike.
    pub fn rotates_strike(&self) -> bool {
        self.legal && self.dismissal.is_none() && self.total_runs % 2 == 1
    }

    pub fn to_ball_event(&self) -> BallEvent {
        BallEvent {
            runs: self.total_runs,
            is_wide: self.is_wide,
            is_no_ball: self.is_no_ball,
            is_wicket: self.dismissal.is_some(),
            batsman_runs: self.batsman_runs,
            extras: self.extras,
            label: self.label.clone(),
        }
    }
}

/// One delivery as it happened. Appended to the over and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallEvent {
    pub runs: u32,
    pub is_wide: bool,
    pub is_no_ball: bool,
    pub is_wicket: bool,
    pub batsman_runs: u32,
    pub extras: u32,
    pub label: String,
}

impl BallEvent {
    pub fn is_legal(&self) -> bool {
        !self.is_wide && !self.is_no_ball
    }
}

/// Total runs conceded across a run of deliveries.
pub fn over_runs(balls: &[BallEvent]) -> u32 {
    balls.iter().map(|b| b.runs).sum()
}

/// Legal deliveries in a run of deliveries.
pub fn legal_balls(balls: &[BallEvent]) -> u32 {
    balls.iter().filter(|b| b.is_legal()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(delivery: Delivery) -> DeliveryOutcome {
        delivery.outcome(&ScoringRules::default())
    }

    #[test]
    fn byes_are_held_between_one_and_four() {
        assert_eq!(resolve(Delivery::Bye(0)).total_runs, 1);
        assert_eq!(resolve(Delivery::LegBye(3)).total_runs, 3);
        let big = resolve(Delivery::Bye(200));
        assert_eq!(big.total_runs, 4);
        assert_eq!(big.extras, 4);
        assert_eq!(big.label, "4B");
    }

    #[test]
    fn scoring_shots_credit_the_batsman() {
        let four = resolve(Delivery::Four);
        assert_eq!(four.total_runs, 4);
        assert_eq!(four.batsman_runs, 4);
        assert_eq!(four.extras, 0);
        assert!(four.legal);
        assert_eq!(four.label, "4");
    }

    #[test]
    fn wide_and_no_ball_use_configured_penalty() {
        let rules = ScoringRules {
            wide_runs: 2,
            no_ball_runs: 1,
        };
        let wide = Delivery::Wide.outcome(&rules);
        assert_eq!(wide.total_runs, 2);
        assert_eq!(wide.extras, 2);
        assert!(!wide.legal);
        assert!(wide.is_wide);
        assert_eq!(wide.label, "WD");

        let no_ball = Delivery::NoBall.outcome(&rules);
        assert_eq!(no_ball.total_runs, 1);
        assert!(no_ball.is_no_ball);
        assert_eq!(no_ball.label, "NB");
    }

    #[test]
    fn wicket_scores_nothing_and_carries_kind() {
        let out = resolve(Delivery::Wicket(DismissalKind::Lbw));
        assert_eq!(out.total_runs, 0);
        assert_eq!(out.dismissal, Some(DismissalKind::Lbw));
        assert_eq!(out.label, "W");
        assert!(out.to_ball_event().is_wicket);
    }

    #[test]
    fn byes_are_extras_on_a_legal_ball() {
        let bye = resolve(Delivery::Bye(3));
        assert_eq!(bye.total_runs, 3);
        assert_eq!(bye.batsman_runs, 0);
        assert_eq!(bye.extras, 3);
        assert!(bye.legal);
        assert_eq!(bye.label, "3B");
        assert!(bye.rotates_strike());

        let leg_bye = resolve(Delivery::LegBye(0));
        assert_eq!(leg_bye.total_runs, 1, "at least one run is taken");
        assert_eq!(leg_bye.label, "1LB");
    }

    #[test]
    fn strike_rotation_follows_odd_runs_on_legal_balls() {
        assert!(resolve(Delivery::One).rotates_strike());
        assert!(resolve(Delivery::Three).rotates_strike());
        assert!(!resolve(Delivery::Two).rotates_strike());
        assert!(!resolve(Delivery::Four).rotates_strike());
        assert!(!resolve(Delivery::Wide).rotates_strike());
        assert!(!resolve(Delivery::NoBall).rotates_strike());
        assert!(!resolve(Delivery::Wicket(DismissalKind::RunOut)).rotates_strike());
    }

    #[test]
    fn only_fours_and_sixes_are_boundaries() {
        assert!(Delivery::Four.is_boundary());
        assert!(Delivery::Six.is_boundary());
        assert!(!Delivery::Three.is_boundary());
        assert!(!Delivery::Bye(4).is_boundary());
    }

    #[test]
    fn dismissal_kinds_display_lowercase() {
        assert_eq!(DismissalKind::RunOut.to_string(), "run out");
        assert_eq!(DismissalKind::CaughtBehind.to_string(), "caught behind");
        assert_eq!(DismissalKind::ALL.len(), 7);
    }

    #[test]
    fn over_helpers_skip_illegal_balls() {
        let rules = ScoringRules::default();
        let balls: Vec<BallEvent> = [Delivery::One, Delivery::Wide, Delivery::Four]
            .iter()
            .map(|d| d.outcome(&rules).to_ball_event())
            .collect();
        assert_eq!(over_runs(&balls), 6);
        assert_eq!(legal_balls(&balls), 2);
    }
}
