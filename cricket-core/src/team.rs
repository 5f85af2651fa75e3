//! Team sheets.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fewest players a side may field.
pub const MIN_PLAYERS: usize = 2;

/// Most players a side may field.
pub const MAX_PLAYERS: usize = 11;

/// Index into the match's team pair, always 0 or 1.
pub type TeamIndex = usize;

/// The side that is not `team`.
pub fn other_team(team: TeamIndex) -> TeamIndex {
    if team == 0 {
        1
    } else {
        0
    }
}

/// A named side and its players in batting-order reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub players: Vec<String>,
}

impl TeamInfo {
    pub fn new<I, S>(name: impl Into<String>, players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            players: players.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the sheet is usable for a match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyTeamName);
        }
        if let Some(position) = self.players.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyPlayerName {
                team: self.name.clone(),
                position,
            });
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers {
                team: self.name.clone(),
                count: self.players.len(),
                min: MIN_PLAYERS,
            });
        }
        if self.players.len() > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                team: self.name.clone(),
                count: self.players.len(),
                max: MAX_PLAYERS,
            });
        }
        Ok(())
    }

    pub fn player(&self, index: usize) -> Option<&str> {
        self.players.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Wickets that bowl this side out: one batsman is always left
    /// without a partner.
    pub fn all_out_wickets(&self) -> u32 {
        self.players.len().saturating_sub(1) as u32
    }
}
