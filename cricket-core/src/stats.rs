//! Derived figures for display. Pure functions over the recorded state;
//! nothing here is stored by the engine.

use serde::Serialize;

use crate::delivery::{DismissalKind, BALLS_PER_OVER};
use crate::engine::{MatchState, Winner};
use crate::innings::{BatsmanStats, BowlerStats, InningsData};
use crate::team::TeamIndex;

/// `"overs.balls"` for a count of legal deliveries, e.g. 14 balls is `"2.2"`.
pub fn overs_string(balls: u32) -> String {
    format!("{}.{}", balls / BALLS_PER_OVER, balls % BALLS_PER_OVER)
}

/// Runs per six legal balls. Zero before the first legal ball.
pub fn run_rate(score: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(balls) * f64::from(BALLS_PER_OVER)
}

pub fn innings_run_rate(innings: &InningsData) -> f64 {
    run_rate(innings.score, innings.total_balls)
}

/// Runs per hundred balls faced.
pub fn strike_rate(batsman: &BatsmanStats) -> f64 {
    if batsman.balls == 0 {
        return 0.0;
    }
    f64::from(batsman.runs) / f64::from(batsman.balls) * 100.0
}

/// Runs conceded per over, counting a part-over as its fraction.
pub fn economy(bowler: &BowlerStats) -> f64 {
    let overs =
        f64::from(bowler.overs_bowled) + f64::from(bowler.balls_bowled) / f64::from(BALLS_PER_OVER);
    if overs == 0.0 {
        return 0.0;
    }
    f64::from(bowler.runs_conceded) / overs
}

/// Bowler's overs in `"overs.balls"` form. A full over left unarchived by
/// an all-out still reads as a whole over.
pub fn bowler_overs(bowler: &BowlerStats) -> String {
    let overs = bowler.overs_bowled + bowler.balls_bowled / BALLS_PER_OVER;
    format!("{}.{}", overs, bowler.balls_bowled % BALLS_PER_OVER)
}

/// Scorecard dismissal column.
pub fn dismissal_text(batsman: &BatsmanStats) -> String {
    match &batsman.dismissal {
        None if batsman.is_out => "out".to_string(),
        None => "not out".to_string(),
        Some(d) => match d.kind {
            DismissalKind::Bowled => format!("b {}", d.bowler),
            DismissalKind::RunOut => "run out".to_string(),
            kind => format!("{} b {}", kind, d.bowler),
        },
    }
}

/// Runs still needed by the chasing side, once a target exists.
pub fn runs_required(state: &MatchState) -> Option<u32> {
    let target = state.target?;
    let chase = chasing_innings(state)?;
    Some(target.saturating_sub(chase.score))
}

/// Legal balls left in the chase.
pub fn balls_remaining(state: &MatchState) -> Option<u32> {
    let chase = chasing_innings(state)?;
    Some(
        state
            .config
            .balls_per_innings()
            .saturating_sub(chase.total_balls),
    )
}

/// Runs per over needed to win from here. `None` outside a live chase or
/// with no balls left.
pub fn required_run_rate(state: &MatchState) -> Option<f64> {
    let runs = runs_required(state)?;
    match balls_remaining(state)? {
        0 => None,
        balls => Some(run_rate(runs, balls)),
    }
}

fn chasing_innings(state: &MatchState) -> Option<&InningsData> {
    if state.current_innings != 1 {
        return None;
    }
    state.innings[1].as_ref()
}

/// How a win was achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "by", content = "count")]
pub enum Margin {
    Runs(u32),
    Wickets(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchResult {
    Won { team: TeamIndex, margin: Margin },
    Tie,
}

/// The result of a finished match with its margin.
pub fn match_result(state: &MatchState) -> Option<MatchResult> {
    match state.winner? {
        Winner::Tie => Some(MatchResult::Tie),
        Winner::Team(team) => {
            let first = state.innings[0].as_ref()?;
            let second = state.innings[1].as_ref()?;
            let margin = if team == second.batting_team {
                let left = state.teams[team]
                    .all_out_wickets()
                    .saturating_sub(second.wickets);
                Margin::Wickets(left)
            } else {
                Margin::Runs(first.score.saturating_sub(second.score))
            };
            Some(MatchResult::Won { team, margin })
        }
    }
}

/// One-line result, e.g. `"Lions won by 3 wickets"`.
pub fn result_text(state: &MatchState) -> Option<String> {
    let text = match match_result(state)? {
        MatchResult::Tie => "Match tied".to_string(),
        MatchResult::Won { team, margin } => {
            let (count, unit) = match margin {
                Margin::Runs(n) => (n, "run"),
                Margin::Wickets(n) => (n, "wicket"),
            };
            let plural = if count == 1 { "" } else { "s" };
            format!(
                "{} won by {} {}{}",
                state.teams[team].name, count, unit, plural
            )
        }
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::Delivery;
    use crate::innings::Dismissal;
    use crate::test_support::{drive, playing};

    #[test]
    fn overs_string_splits_balls() {
        assert_eq!(overs_string(0), "0.0");
        assert_eq!(overs_string(14), "2.2");
        assert_eq!(overs_string(120), "20.0");
    }

    #[test]
    fn run_rate_is_per_six_balls() {
        assert_eq!(run_rate(0, 0), 0.0);
        assert!((run_rate(10, 12) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn strike_rate_is_per_hundred_balls() {
        let mut batsman = BatsmanStats::new("Asha", 0);
        assert_eq!(strike_rate(&batsman), 0.0);
        batsman.runs = 30;
        batsman.balls = 20;
        assert!((strike_rate(&batsman) - 150.0).abs() < 1e-9);
    }

    #[test]
    fn economy_counts_part_overs() {
        let mut bowler = BowlerStats::new("Khan", 0);
        assert_eq!(economy(&bowler), 0.0);
        bowler.overs_bowled = 2;
        bowler.balls_bowled = 3;
        bowler.runs_conceded = 15;
        assert!((economy(&bowler) - 6.0).abs() < 1e-9);
        assert_eq!(bowler_overs(&bowler), "2.3");
    }

    #[test]
    fn all_out_on_the_sixth_ball_shows_a_whole_over() {
        let mut over = vec![Delivery::Dot; 4];
        over.extend([
            Delivery::Wicket(DismissalKind::Bowled),
            Delivery::Wicket(DismissalKind::Lbw),
        ]);
        let state = drive(playing(3, 5), &over);
        let inn = state.innings[0].as_ref().unwrap();
        let bowler = &inn.bowlers[0];
        assert_eq!((bowler.overs_bowled, bowler.balls_bowled), (0, 6));
        assert_eq!(bowler_overs(bowler), "1.0");
        assert!((economy(bowler) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn dismissal_text_variants() {
        let mut batsman = BatsmanStats::new("Asha", 0);
        assert_eq!(dismissal_text(&batsman), "not out");

        batsman.is_out = true;
        batsman.dismissal = Some(Dismissal {
            kind: DismissalKind::Bowled,
            bowler: "Khan".to_string(),
        });
        assert_eq!(dismissal_text(&batsman), "b Khan");

        batsman.dismissal = Some(Dismissal {
            kind: DismissalKind::Lbw,
            bowler: "Khan".to_string(),
        });
        assert_eq!(dismissal_text(&batsman), "lbw b Khan");

        batsman.dismissal = Some(Dismissal {
            kind: DismissalKind::RunOut,
            bowler: "Khan".to_string(),
        });
        assert_eq!(dismissal_text(&batsman), "run out");
    }

    fn chase_state() -> MatchState {
        drive(playing(4, 2), &[Delivery::Four; 6])
            .select_bowler(1)
            .unwrap()
            .finish_innings()
            .unwrap()
            .start_second_innings()
            .unwrap()
            .select_openers([0, 1])
            .unwrap()
            .select_bowler(0)
            .unwrap()
    }

    #[test]
    fn chase_queries_track_target() {
        let state = chase_state();
        assert_eq!(state.target, Some(25));
        assert_eq!(runs_required(&state), Some(25));
        assert_eq!(balls_remaining(&state), Some(12));
        assert!((required_run_rate(&state).unwrap() - 12.5).abs() < 1e-9);

        let state = drive(state, &[Delivery::Six, Delivery::Two]);
        assert_eq!(runs_required(&state), Some(17));
        assert_eq!(balls_remaining(&state), Some(10));
    }

    #[test]
    fn chase_queries_are_empty_in_first_innings() {
        let state = playing(3, 2);
        assert_eq!(runs_required(&state), None);
        assert_eq!(balls_remaining(&state), None);
        assert_eq!(required_run_rate(&state), None);
    }

    #[test]
    fn chasing_win_is_by_wickets() {
        let state = drive(chase_state(), &[Delivery::Six; 5]);
        assert_eq!(
            match_result(&state),
            Some(MatchResult::Won {
                team: 1,
                margin: Margin::Wickets(3),
            })
        );
        assert_eq!(result_text(&state).unwrap(), "Tigers won by 3 wickets");
    }

    #[test]
    fn defending_win_is_by_runs() {
        let mut deliveries = vec![Delivery::Six; 3];
        deliveries.extend([Delivery::Dot; 9]);
        let state = drive(chase_state(), &deliveries);
        assert_eq!(
            match_result(&state),
            Some(MatchResult::Won {
                team: 0,
                margin: Margin::Runs(6),
            })
        );
        assert_eq!(result_text(&state).unwrap(), "Lions won by 6 runs");
    }

    #[test]
    fn single_run_margin_is_singular() {
        let mut deliveries = vec![Delivery::Six; 3];
        deliveries.extend([Delivery::Four, Delivery::One]);
        deliveries.extend([Delivery::Dot; 7]);
        let state = drive(chase_state(), &deliveries);
        assert_eq!(result_text(&state).unwrap(), "Lions won by 1 run");
    }

    #[test]
    fn no_result_before_the_end() {
        assert_eq!(result_text(&chase_state()), None);
    }
}
