//! League standings and round-robin seasons.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Game, MatchConfig, MatchResult};
use crate::error::{MatchError, Result};
use crate::models::{Registry, TeamColor, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team: TeamId,
    pub name: String,
    pub color: TeamColor,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub touchdowns: u32,
    pub conceded: u32,
    /// `touchdowns * 100 / conceded`, or `touchdowns * 100` with nothing
    /// conceded.
    pub ratio: u32,
    /// Touchdowns scored, plus the winning margin for the winner.
    pub points: u32,
}

impl StandingRow {
    fn new(team: TeamId, name: &str, color: TeamColor) -> Self {
        Self {
            team,
            name: name.to_string(),
            color,
            played: 0,
            won: 0,
            lost: 0,
            touchdowns: 0,
            conceded: 0,
            ratio: 0,
            points: 0,
        }
    }

    fn add(&mut self, scored: u8, conceded: u8) {
        let (scored, conceded) = (scored as u32, conceded as u32);
        self.played += 1;
        self.touchdowns += scored;
        self.conceded += conceded;
        self.points += scored;
        if scored > conceded {
            self.won += 1;
            self.points += scored - conceded;
        } else {
            self.lost += 1;
        }
        self.ratio = match self.conceded {
            0 => self.touchdowns * 100,
            c => self.touchdowns * 100 / c,
        };
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueTable {
    rows: Vec<StandingRow>,
}

impl LeagueTable {
    /// Empty standings for every team in the registry.
    pub fn new(registry: &Registry) -> Self {
        Self { rows: registry.teams().map(|t| StandingRow::new(t.id(), t.name(), t.color())).collect() }
    }

    /// Adds one finished match. Both teams must be in the table; nothing is
    /// updated otherwise.
    pub fn record(&mut self, result: &MatchResult) -> Result<()> {
        let left = self.index_of(result.left_team)?;
        let right = self.index_of(result.right_team)?;
        self.rows[left].add(result.left_score, result.right_score);
        self.rows[right].add(result.right_score, result.left_score);
        Ok(())
    }

    pub fn row(&self, team: TeamId) -> Option<&StandingRow> {
        self.rows.iter().find(|r| r.team == team)
    }

    fn index_of(&self, team: TeamId) -> Result<usize> {
        self.rows.iter().position(|r| r.team == team).ok_or(MatchError::UnknownTeam(team))
    }

    /// Rows sorted by points, then ratio, best first.
    pub fn standings(&self) -> Vec<&StandingRow> {
        let mut sorted: Vec<&StandingRow> = self.rows.iter().collect();
        sorted.sort_by(|a, b| (b.points, b.ratio).cmp(&(a.points, a.ratio)));
        sorted
    }
}

/// Every pairing once, earlier team on the left.
pub fn round_robin(teams: &[TeamId]) -> Vec<(TeamId, TeamId)> {
    let mut fixtures = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);
    for (i, &left) in teams.iter().enumerate() {
        for &right in &teams[i + 1..] {
            fixtures.push((left, right));
        }
    }
    fixtures
}

/// Finished season: the final table and every match in fixture order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub table: LeagueTable,
    pub results: Vec<MatchResult>,
}

/// Plays a full round robin over the registry's teams. Match `i` is seeded
/// with `seed + i`; each match's stats are committed to the season lines.
pub fn play_season(registry: &mut Registry, config: &MatchConfig, seed: u64) -> Result<Season> {
    registry.reset_season_stats();
    let mut table = LeagueTable::new(registry);
    let fixtures = round_robin(&registry.team_ids());
    let mut results = Vec::with_capacity(fixtures.len());

    for (i, (left, right)) in fixtures.into_iter().enumerate() {
        let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(i as u64));
        let result = Game::new(registry, left, right, config.clone(), rng)?.simulate()?;
        registry.commit_match_stats(&[left, right])?;
        table.record(&result)?;
        log::info!(
            "matchday {}: {} {} : {} {}",
            i + 1,
            result.left_name,
            result.left_score,
            result.right_score,
            result.right_name
        );
        results.push(result);
    }
    Ok(Season { table, results })
}
