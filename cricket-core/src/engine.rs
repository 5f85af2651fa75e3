//! The match state machine.
//!
//! [`MatchState`] is a plain value. Every command borrows the current state
//! and returns a brand new one, so a rejected command leaves the caller's
//! state exactly as it was.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::MatchConfig;
use crate::delivery::{BallEvent, Delivery};
use crate::error::EngineError;
use crate::innings::{BatsmanStats, InningsData};
use crate::team::{other_team, TeamIndex, TeamInfo};

/// Where the match is, and therefore which command it expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Setup,
    Toss,
    SelectBatting,
    SelectBowling,
    Playing,
    NewBowler,
    InningsBreak,
    Result,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Setup => "setup",
            Phase::Toss => "toss",
            Phase::SelectBatting => "select-batting",
            Phase::SelectBowling => "select-bowling",
            Phase::Playing => "playing",
            Phase::NewBowler => "new-bowler",
            Phase::InningsBreak => "innings-break",
            Phase::Result => "result",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Winner {
    Team(TeamIndex),
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toss {
    pub winner: TeamIndex,
    pub elected_to_bat: bool,
}

impl Toss {
    pub fn batting_first(&self) -> TeamIndex {
        if self.elected_to_bat {
            self.winner
        } else {
            other_team(self.winner)
        }
    }
}

/// Every command the engine understands, for callers that dispatch values
/// rather than calling methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetupTeams {
        teams: [TeamInfo; 2],
        config: MatchConfig,
    },
    RecordToss {
        winner: TeamIndex,
        elected_to_bat: bool,
    },
    SelectOpeners([usize; 2]),
    SelectBowler(usize),
    ScoreDelivery(Delivery),
    SelectNewBatsman(usize),
    StartSecondInnings,
    FinishInnings,
    ResetMatch,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetupTeams { .. } => "setup_teams",
            Command::RecordToss { .. } => "record_toss",
            Command::SelectOpeners(_) => "select_openers",
            Command::SelectBowler(_) => "select_bowler",
            Command::ScoreDelivery(_) => "score_delivery",
            Command::SelectNewBatsman(_) => "select_new_batsman",
            Command::StartSecondInnings => "start_second_innings",
            Command::FinishInnings => "finish_innings",
            Command::ResetMatch => "reset_match",
        }
    }
}

/// The whole match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: Phase,
    pub teams: [TeamInfo; 2],
    pub config: MatchConfig,
    pub toss: Option<Toss>,
    /// 0 for the first innings, 1 for the second.
    pub current_innings: usize,
    pub innings: [Option<InningsData>; 2],
    /// Balls of the most recently finished over, for the over summary.
    pub last_completed_over: Vec<BallEvent>,
    pub winner: Option<Winner>,
    /// Runs the side batting second needs; set when the first innings ends.
    pub target: Option<u32>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// A fresh match waiting for team sheets.
    pub fn new() -> Self {
        Self {
            phase: Phase::Setup,
            teams: [TeamInfo::default(), TeamInfo::default()],
            config: MatchConfig::default(),
            toss: None,
            current_innings: 0,
            innings: [None, None],
            last_completed_over: Vec::new(),
            winner: None,
            target: None,
        }
    }

    /// Dispatch a [`Command`] to the matching method.
    pub fn apply(&self, command: Command) -> Result<MatchState, EngineError> {
        match command {
            Command::SetupTeams {
                teams: [team1, team2],
                config,
            } => self.setup_match(team1, team2, config),
            Command::RecordToss {
                winner,
                elected_to_bat,
            } => self.record_toss(winner, elected_to_bat),
            Command::SelectOpeners(pair) => self.select_openers(pair),
            Command::SelectBowler(index) => self.select_bowler(index),
            Command::ScoreDelivery(delivery) => self.score_delivery(delivery),
            Command::SelectNewBatsman(index) => self.select_new_batsman(index),
            Command::StartSecondInnings => self.start_second_innings(),
            Command::FinishInnings => self.finish_innings(),
            Command::ResetMatch => Ok(self.reset_match()),
        }
    }

    /// Store both teams with the default scoring rules and move to the toss.
    pub fn setup_teams(
        &self,
        team1: TeamInfo,
        team2: TeamInfo,
        overs_per_innings: u32,
    ) -> Result<MatchState, EngineError> {
        self.setup_match(team1, team2, MatchConfig::with_overs(overs_per_innings))
    }

    pub fn setup_match(
        &self,
        team1: TeamInfo,
        team2: TeamInfo,
        config: MatchConfig,
    ) -> Result<MatchState, EngineError> {
        self.expect_phase("setup_teams", &[Phase::Setup])?;
        team1.validate()?;
        team2.validate()?;
        config.validate()?;

        debug!(
            team1 = %team1.name,
            team2 = %team2.name,
            overs = config.overs_per_innings,
            "teams set up"
        );
        Ok(MatchState {
            teams: [team1, team2],
            config,
            phase: Phase::Toss,
            ..self.clone()
        })
    }

    pub fn record_toss(
        &self,
        winner: TeamIndex,
        elected_to_bat: bool,
    ) -> Result<MatchState, EngineError> {
        self.expect_phase("record_toss", &[Phase::Toss])?;
        if winner >= self.teams.len() {
            return Err(EngineError::UnknownTeam { index: winner });
        }

        let toss = Toss {
            winner,
            elected_to_bat,
        };
        debug!(
            winner = %self.teams[winner].name,
            batting_first = %self.teams[toss.batting_first()].name,
            "toss recorded"
        );
        Ok(MatchState {
            toss: Some(toss),
            current_innings: 0,
            phase: Phase::SelectBatting,
            ..self.clone()
        })
    }

    /// Open the active innings with `openers[0]` on strike.
    pub fn select_openers(&self, openers: [usize; 2]) -> Result<MatchState, EngineError> {
        self.expect_phase("select_openers", &[Phase::SelectBatting])?;
        let batting_team = self.batting_team_index();
        let team = &self.teams[batting_team];
        let [first, second] = openers;
        let striker = player_name(team, first)?;
        let non_striker = player_name(team, second)?;
        if first == second {
            return Err(EngineError::DuplicateOpeners);
        }

        let mut next = self.clone();
        next.innings[self.current_innings] = Some(InningsData::new(
            batting_team,
            BatsmanStats::new(striker, first),
            BatsmanStats::new(non_striker, second),
        ));
        next.phase = Phase::SelectBowling;
        Ok(next)
    }

    /// Hand the ball to `player_index` of the fielding side.
    pub fn select_bowler(&self, player_index: usize) -> Result<MatchState, EngineError> {
        self.expect_phase("select_bowler", &[Phase::SelectBowling, Phase::NewBowler])?;
        let mut next = self.clone();
        let phase = next.phase;
        let inn = next.active_innings_mut("select_bowler")?;
        let name = player_name(&self.teams[inn.bowling_team()], player_index)?;

        if phase == Phase::NewBowler
            && inn.current_bowler().map(|b| b.player_index) == Some(player_index)
        {
            return Err(EngineError::BowledPreviousOver {
                index: player_index,
            });
        }

        inn.set_bowler(name, player_index);
        next.phase = Phase::Playing;
        Ok(next)
    }

    /// Record one delivery and advance the match.
    pub fn score_delivery(&self, delivery: Delivery) -> Result<MatchState, EngineError> {
        self.expect_phase("score_delivery", &[Phase::Playing])?;
        let mut next = self.clone();
        let outcome = delivery.outcome(&self.config.rules);
        let overs_per_innings = self.config.overs_per_innings as usize;
        let chasing = self.current_innings == 1;
        let target = self.target;

        let inn = next.active_innings_mut("score_delivery")?;
        if inn.needs_new_batsman {
            return Err(EngineError::AwaitingNewBatsman);
        }
        let all_out_wickets = self.teams[inn.batting_team].all_out_wickets();
        let effect = inn.apply_delivery(&outcome, all_out_wickets);

        if effect.all_out {
            let last_over = inn.current_over.clone();
            return Ok(next.close_innings(last_over));
        }

        let score = inn.score;
        let batting_team = inn.batting_team;
        let overs_done = inn.overs.len();

        if let Some(over) = effect.completed_over {
            if overs_done >= overs_per_innings {
                return Ok(next.close_innings(over));
            }
            next.last_completed_over = over;
            next.phase = Phase::NewBowler;
        }

        if chasing && target.is_some_and(|t| score >= t) {
            next.winner = Some(Winner::Team(batting_team));
            next.phase = Phase::Result;
            info!(
                winner = %next.teams[batting_team].name,
                score,
                "target reached"
            );
        }

        Ok(next)
    }

    /// Replace the dismissed striker with `player_index`.
    pub fn select_new_batsman(&self, player_index: usize) -> Result<MatchState, EngineError> {
        self.expect_phase("select_new_batsman", &[Phase::Playing, Phase::NewBowler])?;
        let mut next = self.clone();
        let phase = next.phase;
        let inn = next.active_innings_mut("select_new_batsman")?;
        if !inn.needs_new_batsman {
            return Err(EngineError::InvalidTransition {
                command: "select_new_batsman",
                phase,
            });
        }
        let name = player_name(&self.teams[inn.batting_team], player_index)?;
        if inn.has_batted(player_index) {
            return Err(EngineError::PlayerAlreadyBatted {
                index: player_index,
            });
        }

        inn.bring_in_batsman(name, player_index);
        Ok(next)
    }

    pub fn start_second_innings(&self) -> Result<MatchState, EngineError> {
        self.expect_phase("start_second_innings", &[Phase::InningsBreak])?;
        Ok(MatchState {
            current_innings: 1,
            phase: Phase::SelectBatting,
            ..self.clone()
        })
    }

    /// Close the active innings now, as a declaration or an early finish.
    pub fn finish_innings(&self) -> Result<MatchState, EngineError> {
        self.expect_phase("finish_innings", &[Phase::Playing, Phase::NewBowler])?;
        let inn = self.active_innings("finish_innings")?;
        let last_over = if inn.current_over.is_empty() {
            inn.overs.last().cloned().unwrap_or_default()
        } else {
            inn.current_over.clone()
        };
        Ok(self.clone().close_innings(last_over))
    }

    /// Throw everything away and start again.
    pub fn reset_match(&self) -> MatchState {
        MatchState::new()
    }

    /// Team batting in the active innings.
    pub fn batting_team_index(&self) -> TeamIndex {
        let first = self.toss.map(|t| t.batting_first()).unwrap_or(0);
        if self.current_innings == 0 {
            first
        } else {
            other_team(first)
        }
    }

    pub fn bowling_team_index(&self) -> TeamIndex {
        other_team(self.batting_team_index())
    }

    pub fn current(&self) -> Option<&InningsData> {
        self.innings.get(self.current_innings)?.as_ref()
    }

    /// Players of the batting side who can still come in.
    pub fn available_batsmen(&self) -> Vec<usize> {
        let team = &self.teams[self.batting_team_index()];
        (0..team.len())
            .filter(|&idx| self.current().map_or(true, |inn| !inn.has_batted(idx)))
            .collect()
    }

    /// Players of the fielding side who may bowl the next over. The bowler
    /// of the over just finished is excluded.
    pub fn eligible_bowlers(&self) -> Vec<usize> {
        let team = &self.teams[self.bowling_team_index()];
        let last = match self.phase {
            Phase::NewBowler => self
                .current()
                .and_then(|inn| inn.current_bowler())
                .map(|b| b.player_index),
            _ => None,
        };
        (0..team.len()).filter(|&idx| Some(idx) != last).collect()
    }

    fn expect_phase(
        &self,
        command: &'static str,
        allowed: &[Phase],
    ) -> Result<(), EngineError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                command,
                phase: self.phase,
            })
        }
    }

    fn active_innings(&self, command: &'static str) -> Result<&InningsData, EngineError> {
        self.current().ok_or(EngineError::InvalidTransition {
            command,
            phase: self.phase,
        })
    }

    fn active_innings_mut(
        &mut self,
        command: &'static str,
    ) -> Result<&mut InningsData, EngineError> {
        let phase = self.phase;
        self.innings
            .get_mut(self.current_innings)
            .and_then(Option::as_mut)
            .ok_or(EngineError::InvalidTransition { command, phase })
    }

    /// Shared end-of-innings handling for all-out, overs exhausted and
    /// early finish.
    fn close_innings(mut self, last_over: Vec<BallEvent>) -> MatchState {
        self.last_completed_over = last_over;
        let Some((score, wickets, batting_team)) = self
            .current()
            .map(|inn| (inn.score, inn.wickets, inn.batting_team))
        else {
            return self;
        };

        if self.current_innings == 0 {
            self.target = Some(score + 1);
            self.phase = Phase::InningsBreak;
            info!(
                team = %self.teams[batting_team].name,
                score,
                wickets,
                target = score + 1,
                "first innings closed"
            );
            return self;
        }

        let first_score = self.innings[0].as_ref().map_or(0, |inn| inn.score);
        let winner = match score.cmp(&first_score) {
            std::cmp::Ordering::Greater => Winner::Team(batting_team),
            std::cmp::Ordering::Less => Winner::Team(other_team(batting_team)),
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        self.winner = Some(winner);
        self.phase = Phase::Result;
        info!(score, first_score, ?winner, "match finished");
        self
    }
}

fn player_name(team: &TeamInfo, index: usize) -> Result<&str, EngineError> {
    team.player(index).ok_or(EngineError::PlayerOutOfRange {
        index,
        team_size: team.len(),
    })
}
