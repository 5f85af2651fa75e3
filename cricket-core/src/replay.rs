//! Recompute innings totals from the ball-by-ball log.

use crate::delivery::BallEvent;
use crate::innings::InningsData;

/// Totals that the event log alone determines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayTally {
    pub score: u32,
    pub wickets: u32,
    pub legal_balls: u32,
}

impl ReplayTally {
    pub fn record(&mut self, ball: &BallEvent) {
        self.score += ball.runs;
        if ball.is_wicket {
            self.wickets += 1;
        }
        if ball.is_legal() {
            self.legal_balls += 1;
        }
    }

    /// Replay every archived over and then the over in progress.
    pub fn from_innings(innings: &InningsData) -> Self {
        tally(innings.overs.iter().flatten().chain(&innings.current_over))
    }

    /// The same three figures as the engine tracked them live.
    pub fn live(innings: &InningsData) -> Self {
        Self {
            score: innings.score,
            wickets: innings.wickets,
            legal_balls: innings.total_balls,
        }
    }
}

pub fn tally<'a>(balls: impl IntoIterator<Item = &'a BallEvent>) -> ReplayTally {
    let mut tally = ReplayTally::default();
    for ball in balls {
        tally.record(ball);
    }
    tally
}

/// True when replaying the log reproduces the live totals.
pub fn verify_replay(innings: &InningsData) -> bool {
    ReplayTally::from_innings(innings) == ReplayTally::live(innings)
}
