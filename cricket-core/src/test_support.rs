//! Fixtures shared by the engine tests.

use crate::delivery::Delivery;
use crate::engine::{MatchState, Phase};
use crate::team::TeamInfo;

/// A side named `name` with players `"{name} 0"`, `"{name} 1"`, ...
pub fn squad(name: &str, players: usize) -> TeamInfo {
    TeamInfo::new(name, (0..players).map(|i| format!("{name} {i}")))
}

/// Lions (batting first) against Tigers, openers 0 and 1, Tigers 0 bowling.
pub fn playing(players: usize, overs: u32) -> MatchState {
    MatchState::new()
        .setup_teams(squad("Lions", players), squad("Tigers", players), overs)
        .unwrap()
        .record_toss(0, true)
        .unwrap()
        .select_openers([0, 1])
        .unwrap()
        .select_bowler(0)
        .unwrap()
}

/// Bowl `deliveries` in order. Before each one, a pending batsman or bowler
/// change is filled with the first eligible player; nothing is filled after
/// the last delivery. Stops early once play ends.
pub fn drive(mut state: MatchState, deliveries: &[Delivery]) -> MatchState {
    for delivery in deliveries {
        state = prepare(state);
        if state.phase != Phase::Playing {
            break;
        }
        state = state.score_delivery(*delivery).unwrap();
    }
    state
}

/// Fill any pending batsman or bowler change so the next delivery can be bowled.
pub fn prepare(mut state: MatchState) -> MatchState {
    if state.current().is_some_and(|inn| inn.needs_new_batsman) {
        let next = state.available_batsmen()[0];
        state = state.select_new_batsman(next).unwrap();
    }
    if state.phase == Phase::NewBowler {
        let next = state.eligible_bowlers()[0];
        state = state.select_bowler(next).unwrap();
    }
    state
}
