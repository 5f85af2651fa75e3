//! Match configuration: innings length and the runs awarded for extras.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Innings length used when nothing else is chosen.
pub const DEFAULT_OVERS: u32 = 20;

/// Longest innings the engine accepts.
pub const MAX_OVERS: u32 = 50;

/// Innings lengths offered by the setup screen.
pub const OVER_CHOICES: [u32; 4] = [5, 10, 20, 50];

/// Penalty runs awarded to the batting side for illegal deliveries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub wide_runs: u32,
    pub no_ball_runs: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            wide_runs: 1,
            no_ball_runs: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub overs_per_innings: u32,
    #[serde(default)]
    pub rules: ScoringRules,
}

impl MatchConfig {
    pub fn with_overs(overs_per_innings: u32) -> Self {
        Self {
            overs_per_innings,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_OVERS).contains(&self.overs_per_innings) {
            return Err(ConfigError::InvalidOvers {
                overs: self.overs_per_innings,
                max: MAX_OVERS,
            });
        }
        Ok(())
    }

    /// Legal deliveries available to one innings.
    pub fn balls_per_innings(&self) -> u32 {
        self.overs_per_innings * crate::delivery::BALLS_PER_OVER
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            overs_per_innings: DEFAULT_OVERS,
            rules: ScoringRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_twenty_overs_with_single_run_extras() {
        let config = MatchConfig::default();
        assert_eq!(config.overs_per_innings, 20);
        assert_eq!(config.rules.wide_runs, 1);
        assert_eq!(config.rules.no_ball_runs, 1);
        assert_eq!(config.balls_per_innings(), 120);
    }

    #[test]
    fn offered_choices_are_all_valid() {
        for overs in OVER_CHOICES {
            assert!(MatchConfig::with_overs(overs).validate().is_ok());
        }
    }

    #[test]
    fn zero_and_oversized_innings_are_rejected() {
        assert_eq!(
            MatchConfig::with_overs(0).validate(),
            Err(ConfigError::InvalidOvers { overs: 0, max: 50 })
        );
        assert!(MatchConfig::with_overs(51).validate().is_err());
    }

    #[test]
    fn rules_default_when_missing_from_json() {
        let config: MatchConfig = serde_json::from_str(r#"{"overs_per_innings": 5}"#).unwrap();
        assert_eq!(config.rules, ScoringRules::default());
    }
}
