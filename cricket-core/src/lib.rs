//! Live scoring for a two-innings limited-overs cricket match.
//!
//! The crate is a pure state machine: build a [`MatchState`], issue commands
//! against it and render whatever comes back. Nothing here performs I/O.
//!
//! ```
//! use cricket_core::{Delivery, MatchState, Phase, TeamInfo};
//!
//! let state = MatchState::new()
//!     .setup_teams(
//!         TeamInfo::new("Lions", ["Asha", "Ben"]),
//!         TeamInfo::new("Tigers", ["Cal", "Dev"]),
//!         1,
//!     )?
//!     .record_toss(0, true)?
//!     .select_openers([0, 1])?
//!     .select_bowler(1)?
//!     .score_delivery(Delivery::Four)?;
//!
//! assert_eq!(state.phase, Phase::Playing);
//! assert_eq!(state.current().map(|inn| inn.score), Some(4));
//! # Ok::<(), cricket_core::EngineError>(())
//! ```

pub mod config;
pub mod cue;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod innings;
pub mod replay;
pub mod scorecard;
pub mod stats;
pub mod team;

#[cfg(test)]
mod props;
#[cfg(test)]
mod test_support;

pub use config::{MatchConfig, ScoringRules};
pub use delivery::{BallEvent, Delivery, DismissalKind, BALLS_PER_OVER};
pub use engine::{Command, MatchState, Phase, Toss, Winner};
pub use error::{ConfigError, EngineError};
pub use innings::{BatsmanStats, BowlerStats, Dismissal, InningsData};
pub use scorecard::Scorecard;
pub use team::{TeamIndex, TeamInfo};
