//! Printable scorecard built from a match snapshot.

use serde::Serialize;

use crate::engine::MatchState;
use crate::innings::InningsData;
use crate::stats::{
    bowler_overs, dismissal_text, economy, innings_run_rate, match_result, overs_string,
    result_text, strike_rate, MatchResult,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattingLine {
    pub name: String,
    pub dismissal: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BowlingLine {
    pub name: String,
    pub overs: String,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InningsCard {
    pub team: String,
    pub score: u32,
    pub wickets: u32,
    pub overs: String,
    pub run_rate: f64,
    pub extras: u32,
    pub batting: Vec<BattingLine>,
    pub bowling: Vec<BowlingLine>,
}

impl InningsCard {
    pub fn new(team: &str, innings: &InningsData) -> Self {
        Self {
            team: team.to_string(),
            score: innings.score,
            wickets: innings.wickets,
            overs: overs_string(innings.total_balls),
            run_rate: innings_run_rate(innings),
            extras: innings.extras(),
            batting: innings
                .batsmen
                .iter()
                .map(|b| BattingLine {
                    name: b.name.clone(),
                    dismissal: dismissal_text(b),
                    runs: b.runs,
                    balls: b.balls,
                    fours: b.fours,
                    sixes: b.sixes,
                    strike_rate: strike_rate(b),
                })
                .collect(),
            bowling: innings
                .bowlers
                .iter()
                .map(|b| BowlingLine {
                    name: b.name.clone(),
                    overs: bowler_overs(b),
                    maidens: b.maidens,
                    runs: b.runs_conceded,
                    wickets: b.wickets,
                    economy: economy(b),
                })
                .collect(),
        }
    }

    /// `"124/3"`.
    pub fn total(&self) -> String {
        format!("{}/{}", self.score, self.wickets)
    }
}

/// Every innings played so far plus the result once there is one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub innings: Vec<InningsCard>,
    pub result: Option<MatchResult>,
    pub summary: Option<String>,
}

impl Scorecard {
    pub fn from_state(state: &MatchState) -> Self {
        let innings = state
            .innings
            .iter()
            .flatten()
            .map(|inn| InningsCard::new(&state.teams[inn.batting_team].name, inn))
            .collect();
        Self {
            innings,
            result: match_result(state),
            summary: result_text(state),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
