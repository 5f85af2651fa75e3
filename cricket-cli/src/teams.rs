use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use cricket_core::TeamInfo;
use serde::{Deserialize, Serialize};

/// Team sheet file: two sides and, optionally, the overs to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub teams: Vec<TeamInfo>,
    #[serde(default)]
    pub overs: Option<u32>,
}

impl TeamSheet {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading team sheet {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing team sheet {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let sheet: TeamSheet = serde_json::from_str(raw)?;
        if sheet.teams.len() != 2 {
            bail!("expected exactly 2 teams, found {}", sheet.teams.len());
        }
        Ok(sheet)
    }

    pub fn into_pair(self) -> Result<[TeamInfo; 2]> {
        let count = self.teams.len();
        let pair: [TeamInfo; 2] = self
            .teams
            .try_into()
            .map_err(|_| anyhow::anyhow!("expected exactly 2 teams, found {count}"))?;
        Ok(pair)
    }
}

impl Default for TeamSheet {
    fn default() -> Self {
        Self {
            teams: vec![
                TeamInfo::new(
                    "Lions",
                    [
                        "Arjun", "Bailey", "Chen", "Dimitri", "Eze", "Farid", "Gus", "Hiro",
                        "Idris", "Jonah", "Kofi",
                    ],
                ),
                TeamInfo::new(
                    "Tigers",
                    [
                        "Liam", "Mateo", "Nikhil", "Oscar", "Pavel", "Quinn", "Rafa", "Sami",
                        "Tomas", "Umar", "Viktor",
                    ],
                ),
            ],
            overs: None,
        }
    }
}

/// The sheet at `path`, or the two demo sides when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<TeamSheet> {
    match path {
        Some(path) => TeamSheet::load(path),
        None => Ok(TeamSheet::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sheet_with_overs() {
        let raw = r#"{
            "teams": [
                {"name": "Hawks", "players": ["A", "B", "C"]},
                {"name": "Owls", "players": ["D", "E"]}
            ],
            "overs": 5
        }"#;
        let sheet = TeamSheet::parse(raw).unwrap();
        assert_eq!(sheet.overs, Some(5));
        let [hawks, owls] = sheet.into_pair().unwrap();
        assert_eq!(hawks.name, "Hawks");
        assert_eq!(owls.players, vec!["D", "E"]);
    }

    #[test]
    fn overs_are_optional() {
        let raw = r#"{"teams": [{"name": "A", "players": ["x", "y"]},
                                {"name": "B", "players": ["z", "w"]}]}"#;
        assert_eq!(TeamSheet::parse(raw).unwrap().overs, None);
    }

    #[test]
    fn rejects_wrong_team_count() {
        let raw = r#"{"teams": [{"name": "A", "players": ["x", "y"]}]}"#;
        let err = TeamSheet::parse(raw).unwrap_err();
        assert!(err.to_string().contains("exactly 2 teams"));
    }

    #[test]
    fn default_sides_are_full_elevens() {
        let sheet = load_or_default(None).unwrap();
        assert!(sheet.teams.iter().all(|t| t.players.len() == 11));
        assert!(sheet.teams.iter().all(|t| t.validate().is_ok()));
    }
}
