//! Roster files: the serialized source of teams and player attributes.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::TeamColor;
use crate::engine::constants::TEAM_SIZE;
use crate::error::{MatchError, Result};
use crate::player::Attributes;

const FIRST_NAMES: [&str; 40] = [
    "Aaron", "Ben", "Carl", "Dan", "Eli", "Felix", "Gabe", "Hugo", "Ian", "Jack", "Kai", "Leo", "Max", "Nate",
    "Omar", "Paul", "Quinn", "Ray", "Sam", "Tom", "Uri", "Vic", "Will", "Xavi", "Yuri", "Zack", "Adam", "Boaz",
    "Cole", "Dean", "Evan", "Finn", "Gil", "Hank", "Ivan", "Joel", "Kyle", "Liam", "Mark", "Noah",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub color: TeamColor,
    pub players: Vec<PlayerRecord>,
}

/// A league's worth of teams, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFile {
    pub teams: Vec<TeamRecord>,
}

impl RosterFile {
    /// Random league of `team_count` teams named "Team A", "Team B", ...
    /// with the league palette and generated attributes.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, team_count: usize) -> Result<Self> {
        let palette = TeamColor::LEAGUE_PALETTE;
        if team_count == 0 || team_count > palette.len() {
            return Err(MatchError::InvalidRoster(format!(
                "can generate between 1 and {} teams, asked for {}",
                palette.len(),
                team_count
            )));
        }
        let teams = palette
            .iter()
            .take(team_count)
            .enumerate()
            .map(|(i, &color)| TeamRecord {
                name: format!("Team {}", (b'A' + i as u8) as char),
                color,
                players: (0..TEAM_SIZE)
                    .map(|_| PlayerRecord {
                        name: FIRST_NAMES.choose(rng).copied().unwrap_or("Player").to_string(),
                        attributes: Attributes::generate(rng),
                    })
                    .collect(),
            })
            .collect();
        Ok(Self { teams })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generate_names_and_colors() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let roster = RosterFile::generate(&mut rng, 8).unwrap();
        assert_eq!(roster.teams.len(), 8);
        assert_eq!(roster.teams[0].name, "Team A");
        assert_eq!(roster.teams[7].name, "Team H");
        assert_eq!(roster.teams[1].color, TeamColor::Blue);
        assert!(roster.teams.iter().all(|t| t.players.len() == TEAM_SIZE));

        assert!(RosterFile::generate(&mut rng, 9).is_err());
        assert!(RosterFile::generate(&mut rng, 0).is_err());
    }

    #[test]
    fn test_generate_is_seeded() {
        let a = RosterFile::generate(&mut ChaCha8Rng::seed_from_u64(3), 2).unwrap();
        let b = RosterFile::generate(&mut ChaCha8Rng::seed_from_u64(3), 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_json_missing_attributes_default() {
        let json = r#"{"teams":[{"name":"Owls","color":"teal","players":[{"name":"Avi"}]}]}"#;
        let roster = RosterFile::from_json(json).unwrap();
        assert_eq!(roster.teams[0].color, TeamColor::Teal);
        assert_eq!(roster.teams[0].players[0].attributes, Attributes::default());

        let written = roster.to_json().unwrap();
        assert_eq!(RosterFile::from_json(&written).unwrap(), roster);
    }

    #[test]
    fn test_bad_json_is_serialization_error() {
        let err = RosterFile::from_json("{ not json").unwrap_err();
        assert!(matches!(err, MatchError::Serialization(_)));
    }
}
