//! Arena of players and teams, indexed by sequential ids.

use serde::{Deserialize, Serialize};

use super::{PlayerId, RosterFile, Team, TeamColor, TeamId};
use crate::engine::constants::TEAM_SIZE;
use crate::error::{MatchError, Result};
use crate::player::{Attributes, Player};

/// Every player known to a [`Registry`], stored at `PlayerId` order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerPool {
    players: Vec<Player>,
}

impl PlayerPool {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id.index()).ok_or(MatchError::UnknownPlayer(id))
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players.get_mut(id.index()).ok_or(MatchError::UnknownPlayer(id))
    }

    /// Mutable access to two distinct players at once.
    pub fn pair_mut(&mut self, first: PlayerId, second: PlayerId) -> Result<(&mut Player, &mut Player)> {
        let (a, b) = (first.index(), second.index());
        if a == b {
            return Err(MatchError::SamePlayer(first));
        }
        let len = self.players.len();
        if a >= len {
            return Err(MatchError::UnknownPlayer(first));
        }
        if b >= len {
            return Err(MatchError::UnknownPlayer(second));
        }
        if a < b {
            let (low, high) = self.players.split_at_mut(b);
            Ok((&mut low[a], &mut high[0]))
        } else {
            let (low, high) = self.players.split_at_mut(a);
            Ok((&mut high[0], &mut low[b]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    fn push(&mut self, name: String, color: TeamColor, attributes: Attributes) -> PlayerId {
        let id = PlayerId(self.players.len() as u32);
        self.players.push(Player::new(id, name, color, attributes));
        id
    }
}

/// Owns every player and team between matches and hands out their ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    players: PlayerPool,
    teams: Vec<Team>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the arena from a roster file, one team per record.
    pub fn from_roster(roster: &RosterFile) -> Result<Self> {
        if roster.teams.len() < 2 {
            return Err(MatchError::InvalidRoster(format!(
                "a match needs two teams, the roster has {}",
                roster.teams.len()
            )));
        }
        let mut registry = Self::new();
        for record in &roster.teams {
            if record.players.len() != TEAM_SIZE {
                return Err(MatchError::InvalidTeamSize {
                    team: record.name.clone(),
                    expected: TEAM_SIZE,
                    found: record.players.len(),
                });
            }
            let ids = record
                .players
                .iter()
                .map(|p| registry.add_player(p.name.clone(), record.color, p.attributes))
                .collect();
            registry.add_team(record.name.clone(), record.color, ids)?;
        }
        log::debug!("registry built: {} teams, {} players", registry.teams.len(), registry.players.len());
        Ok(registry)
    }

    pub fn add_player(&mut self, name: impl Into<String>, color: TeamColor, attributes: Attributes) -> PlayerId {
        self.players.push(name.into(), color, attributes)
    }

    /// Registers a team over already-registered, unattached players.
    pub fn add_team(&mut self, name: impl Into<String>, color: TeamColor, roster: Vec<PlayerId>) -> Result<TeamId> {
        let name = name.into();
        for &id in &roster {
            if let Some(owner) = self.players.get(id)?.team() {
                return Err(MatchError::InvalidRoster(format!("{} already plays for {}", id, owner)));
            }
        }
        let id = TeamId(self.teams.len() as u32);
        let team = Team::new(id, name, color, roster)?;
        for &player in team.roster() {
            self.players.get_mut(player)?.set_team(id, color);
        }
        self.teams.push(team);
        Ok(id)
    }

    pub fn players(&self) -> &PlayerPool {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut PlayerPool {
        &mut self.players
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id)
    }

    pub fn team(&self, id: TeamId) -> Result<&Team> {
        self.teams.get(id.index()).ok_or(MatchError::UnknownTeam(id))
    }

    pub fn team_mut(&mut self, id: TeamId) -> Result<&mut Team> {
        self.teams.get_mut(id.index()).ok_or(MatchError::UnknownTeam(id))
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(Team::id).collect()
    }

    pub fn team_by_name(&self, name: &str) -> Option<TeamId> {
        self.teams.iter().find(|t| t.name() == name).map(Team::id)
    }

    /// A team together with the player pool, for roster-wide updates.
    pub fn team_and_players_mut(&mut self, id: TeamId) -> Result<(&mut Team, &mut PlayerPool)> {
        let team = self.teams.get_mut(id.index()).ok_or(MatchError::UnknownTeam(id))?;
        Ok((team, &mut self.players))
    }

    /// Adds the match line of every roster player of `teams` to their season
    /// and all-time lines.
    pub fn commit_match_stats(&mut self, teams: &[TeamId]) -> Result<()> {
        for &team_id in teams {
            let (team, players) = self.team_and_players_mut(team_id)?;
            for &id in team.roster() {
                players.get_mut(id)?.commit_match_stats();
            }
        }
        Ok(())
    }

    pub fn reset_season_stats(&mut self) {
        for player in self.players.players.iter_mut() {
            player.reset_season_stats();
        }
    }
}
