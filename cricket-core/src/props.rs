//! Property tests for the scoring rules.

use proptest::prelude::*;

use crate::config::{MatchConfig, ScoringRules};
use crate::delivery::{legal_balls, over_runs, Delivery, DismissalKind};
use crate::engine::{MatchState, Phase, Winner};
use crate::replay::{verify_replay, ReplayTally};
use crate::test_support::{drive, playing, prepare, squad};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

fn dismissal() -> impl Strategy<Value = DismissalKind> {
    proptest::sample::select(DismissalKind::ALL.to_vec())
}

/// Deliveries that are legal and cannot take a wicket.
fn legal_scoring() -> impl Strategy<Value = Delivery> {
    prop_oneof![
        Just(Delivery::Dot),
        Just(Delivery::One),
        Just(Delivery::Two),
        Just(Delivery::Three),
        Just(Delivery::Four),
        Just(Delivery::Six),
        (1u8..=4).prop_map(Delivery::Bye),
        (1u8..=4).prop_map(Delivery::LegBye),
    ]
}

fn any_delivery() -> impl Strategy<Value = Delivery> {
    prop_oneof![
        6 => legal_scoring(),
        1 => Just(Delivery::Wide),
        1 => Just(Delivery::NoBall),
        1 => dismissal().prop_map(Delivery::Wicket),
    ]
}

fn fresh_innings(rules: ScoringRules) -> MatchState {
    MatchState::new()
        .setup_match(
            squad("Lions", 11),
            squad("Tigers", 11),
            MatchConfig {
                overs_per_innings: 50,
                rules,
            },
        )
        .unwrap()
        .record_toss(1, false)
        .unwrap()
        .select_openers([0, 1])
        .unwrap()
        .select_bowler(0)
        .unwrap()
}

proptest! {
    #![proptest_config(config())]

    /// The ball log always replays to the live score, wickets and ball count.
    #[test]
    fn prop_event_log_replays_to_live_totals(
        deliveries in prop::collection::vec(any_delivery(), 0..120),
    ) {
        let state = drive(playing(11, 20), &deliveries);
        let inn = state.innings[0].as_ref().unwrap();
        prop_assert!(verify_replay(inn), "live {:?} vs replay {:?}",
            ReplayTally::live(inn), ReplayTally::from_innings(inn));
        prop_assert!(inn.wickets <= 10);
    }

    /// Legal, wicket-free deliveries: score is the sum of runs, balls the count.
    #[test]
    fn prop_legal_deliveries_sum_to_score(
        deliveries in prop::collection::vec(legal_scoring(), 0..60),
    ) {
        let state = drive(playing(11, 20), &deliveries);
        let inn = state.current().unwrap();
        let all: Vec<_> = inn.overs.iter().flatten().chain(&inn.current_over).cloned().collect();
        prop_assert_eq!(inn.score, over_runs(&all));
        prop_assert_eq!(inn.total_balls, legal_balls(&all));
        prop_assert_eq!(inn.total_balls as usize, deliveries.len());
        prop_assert_eq!(inn.overs.len(), deliveries.len() / 6);
        prop_assert!(inn.overs.iter().all(|over| legal_balls(over) == 6));
    }

    /// Mid-over, odd runs change ends and even runs do not.
    #[test]
    fn prop_odd_runs_rotate_strike(delivery in legal_scoring()) {
        let before = fresh_innings(ScoringRules::default());
        let after = before.score_delivery(delivery).unwrap();
        let runs = after.current().unwrap().score;
        let striker = after.current().unwrap().striker().unwrap().player_index;
        if runs % 2 == 1 {
            prop_assert_eq!(striker, 1);
        } else {
            prop_assert_eq!(striker, 0);
        }
    }

    /// Wides and no-balls add exactly the configured penalty and change nothing else.
    #[test]
    fn prop_illegal_delivery_adds_only_penalty(
        wide_runs in 0u32..=5,
        no_ball_runs in 0u32..=5,
        wide in any::<bool>(),
    ) {
        let rules = ScoringRules { wide_runs, no_ball_runs };
        let before = fresh_innings(rules).score_delivery(Delivery::Three).unwrap();
        let (delivery, penalty) = if wide {
            (Delivery::Wide, wide_runs)
        } else {
            (Delivery::NoBall, no_ball_runs)
        };
        let after = before.score_delivery(delivery).unwrap();
        let (b, a) = (before.current().unwrap(), after.current().unwrap());
        prop_assert_eq!(a.score, b.score + penalty);
        prop_assert_eq!(a.total_balls, b.total_balls);
        prop_assert_eq!(a.striker, b.striker);
        prop_assert_eq!(a.striker().unwrap().balls, b.striker().unwrap().balls);
        prop_assert_eq!(a.striker().unwrap().runs, b.striker().unwrap().runs);
    }

    /// A completed over is a maiden exactly when it conceded nothing.
    #[test]
    fn prop_maiden_iff_scoreless_over(over in prop::collection::vec(legal_scoring(), 6)) {
        let state = drive(fresh_innings(ScoringRules::default()), &over);
        prop_assert_eq!(state.phase, Phase::NewBowler);
        let inn = state.current().unwrap();
        let bowler = inn.current_bowler().unwrap();
        prop_assert_eq!(bowler.overs_bowled, 1);
        prop_assert_eq!(bowler.balls_bowled, 0);
        prop_assert!(inn.current_over.is_empty());
        let scoreless = inn.score == 0;
        prop_assert_eq!(bowler.maidens, u32::from(scoreless));
    }

    /// Falling `players - 1` wickets ends the innings and sets the target.
    #[test]
    fn prop_all_out_sets_target(
        players in 2usize..=11,
        runs in prop::collection::vec(legal_scoring(), 0..5),
        kind in dismissal(),
    ) {
        let mut deliveries = runs;
        deliveries.extend(std::iter::repeat(Delivery::Wicket(kind)).take(players - 1));
        let state = drive(playing(players, 50), &deliveries);
        prop_assert_eq!(state.phase, Phase::InningsBreak);
        let inn = state.innings[0].as_ref().unwrap();
        prop_assert_eq!(inn.wickets as usize, players - 1);
        prop_assert_eq!(state.target, Some(inn.score + 1));
    }

    /// In a chase, the match ends on the ball the target is reached.
    #[test]
    fn prop_chase_ends_on_reaching_target(
        first in prop::collection::vec(legal_scoring(), 1..30),
        second in prop::collection::vec(legal_scoring(), 1..60),
    ) {
        let mut state = drive(playing(11, 10), &first);
        if state.phase != Phase::InningsBreak {
            state = prepare(state).finish_innings().unwrap();
        }
        let target = state.target.unwrap();
        let mut state = state
            .start_second_innings().unwrap()
            .select_openers([0, 1]).unwrap()
            .select_bowler(0).unwrap();

        for delivery in second {
            state = prepare(state);
            if state.phase != Phase::Playing {
                break;
            }
            state = state.score_delivery(delivery).unwrap();
            let score = state.current().unwrap().score;
            if score >= target {
                prop_assert_eq!(state.phase, Phase::Result);
                prop_assert_eq!(state.winner, Some(Winner::Team(1)));
                break;
            }
            prop_assert_ne!(state.phase, Phase::Result);
        }
    }

    /// Rejected commands never change the state they were given.
    #[test]
    fn prop_rejected_command_leaves_state(delivery in any_delivery()) {
        let state = MatchState::new();
        prop_assert!(state.score_delivery(delivery).is_err());
        prop_assert_eq!(state, MatchState::new());
    }
}
