use serde::{Deserialize, Serialize};

use super::events::MatchEvent;
use crate::error::Result;
use crate::models::{PlayerId, PlayerPool, TeamId};
use crate::player::{PerformanceScore, Stat};

/// A player who led the match in one or more stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub player: PlayerId,
    pub name: String,
    pub team: Option<TeamId>,
    /// `(stat, value)` for every stat this player led, in stat order.
    pub stats: Vec<(Stat, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub player: PlayerId,
    pub name: String,
    pub team: Option<TeamId>,
    pub score: PerformanceScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub left_team: TeamId,
    pub right_team: TeamId,
    pub left_name: String,
    pub right_name: String,
    pub left_score: u8,
    pub right_score: u8,
    pub winner: TeamId,
    pub sets_played: u32,
    pub phases_played: u32,
    pub turns_played: u32,
    pub events: Vec<MatchEvent>,
    pub top_performers: Vec<TopPerformer>,
    pub ratings: Vec<PlayerRating>,
}

impl MatchResult {
    pub fn winner_name(&self) -> &str {
        if self.winner == self.left_team {
            &self.left_name
        } else {
            &self.right_name
        }
    }

    /// Touchdowns scored by `team`, if it played this match.
    pub fn score_for(&self, team: TeamId) -> Option<u8> {
        if team == self.left_team {
            Some(self.left_score)
        } else if team == self.right_team {
            Some(self.right_score)
        } else {
            None
        }
    }

    pub fn total_score(&self) -> u32 {
        self.left_score as u32 + self.right_score as u32
    }
}

/// For every stat, the first player in `roster` order with the highest
/// non-zero match value; stats led by the same player are grouped.
pub fn top_performers(players: &PlayerPool, roster: &[PlayerId]) -> Result<Vec<TopPerformer>> {
    let mut leaders: Vec<TopPerformer> = Vec::new();
    for stat in Stat::ALL.into_iter().filter(|s| !s.is_bookkeeping()) {
        let mut best: Option<(PlayerId, u32)> = None;
        for &id in roster {
            let value = players.get(id)?.current_match_stat(stat);
            if value > best.map_or(0, |(_, v)| v) {
                best = Some((id, value));
            }
        }
        let Some((id, value)) = best else {
            continue;
        };
        match leaders.iter_mut().find(|p| p.player == id) {
            Some(leader) => leader.stats.push((stat, value)),
            None => {
                let player = players.get(id)?;
                leaders.push(TopPerformer {
                    player: id,
                    name: player.name().to_string(),
                    team: player.team(),
                    stats: vec![(stat, value)],
                });
            }
        }
    }
    Ok(leaders)
}

/// Performance of every `roster` player who played at least one set.
pub fn ratings(players: &PlayerPool, roster: &[PlayerId]) -> Result<Vec<PlayerRating>> {
    let mut out = Vec::new();
    for &id in roster {
        let player = players.get(id)?;
        if let Some(score) = player.performance() {
            out.push(PlayerRating { player: id, name: player.name().to_string(), team: player.team(), score });
        }
    }
    Ok(out)
}
