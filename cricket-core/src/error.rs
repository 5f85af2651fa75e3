//! Error types returned by the match engine.

use thiserror::Error;

use crate::engine::Phase;

/// Team or match setup that fails the minimum requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("team name must not be empty")]
    EmptyTeamName,

    #[error("team {team} has {count} players, at least {min} required")]
    TooFewPlayers {
        team: String,
        count: usize,
        min: usize,
    },

    #[error("team {team} has {count} players, at most {max} allowed")]
    TooManyPlayers {
        team: String,
        count: usize,
        max: usize,
    },

    #[error("team {team} has a blank player name at position {position}")]
    EmptyPlayerName { team: String, position: usize },

    #[error("overs per innings must be between 1 and {max}, got {overs}")]
    InvalidOvers { overs: u32, max: u32 },
}

/// A command the engine refused. The prior state is always left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{command} is not valid during the {phase} phase")]
    InvalidTransition {
        command: &'static str,
        phase: Phase,
    },

    #[error("team {index} does not exist")]
    UnknownTeam { index: usize },

    #[error("player {index} is out of range for a team of {team_size}")]
    PlayerOutOfRange { index: usize, team_size: usize },

    #[error("openers must be two different players")]
    DuplicateOpeners,

    #[error("player {index} has already batted this innings")]
    PlayerAlreadyBatted { index: usize },

    #[error("player {index} bowled the previous over")]
    BowledPreviousOver { index: usize },

    #[error("a new batsman must come in before the next delivery")]
    AwaitingNewBatsman,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// True for every refusal caused by the command arriving in the wrong
    /// phase or naming a player that cannot be used.
    pub fn is_invalid_transition(&self) -> bool {
        !matches!(self, EngineError::Config(_))
    }
}
