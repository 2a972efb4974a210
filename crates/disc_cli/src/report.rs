//! Plain-text reports for match results, standings and season statistics.

use std::fmt::Write as _;

use disc_core::engine::{MatchEvent, MatchResult};
use disc_core::league::LeagueTable;
use disc_core::models::{PlayerId, Registry, TeamId};
use disc_core::player::Stat;

/// Display names captured before a match borrows the registry.
#[derive(Debug, Clone, Default)]
pub struct Names {
    players: Vec<String>,
    teams: Vec<String>,
}

impl Names {
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            players: registry.players().iter().map(|p| p.painted_name()).collect(),
            teams: registry.teams().map(|t| t.painted_name()).collect(),
        }
    }

    pub fn player(&self, id: PlayerId) -> &str {
        self.players.get(id.index()).map_or("?", String::as_str)
    }

    pub fn team(&self, id: TeamId) -> &str {
        self.teams.get(id.index()).map_or("?", String::as_str)
    }

    /// One play-by-play line for an event.
    pub fn describe(&self, event: &MatchEvent) -> String {
        match *event {
            MatchEvent::SetStarted { set, left_score, right_score } => {
                format!("--- Set {} ({} : {}) ---", set, left_score, right_score)
            }
            MatchEvent::Substitution { team, out, into } => {
                format!("{}: {} comes on for {}", self.team(team), self.player(into), self.player(out))
            }
            MatchEvent::Possession { carrier, .. } => format!("{} creates the disc", self.player(carrier)),
            MatchEvent::Dash { carrier } => format!("{} dashes", self.player(carrier)),
            MatchEvent::Pass { passer, catcher, completed: true } => {
                format!("{} passes to {}", self.player(passer), self.player(catcher))
            }
            MatchEvent::Pass { passer, catcher, completed: false } => {
                format!("{} misses {} with the pass", self.player(passer), self.player(catcher))
            }
            MatchEvent::CarrierDown { carrier, by, turn } => {
                format!("turn {}: {} takes down {}", turn, self.player(by), self.player(carrier))
            }
            MatchEvent::Touchdown { scorer, assist, team, left_score, right_score, .. } => {
                let mut line = format!("TOUCHDOWN {}! {} scores", self.team(team), self.player(scorer));
                if let Some(assist) = assist {
                    let _ = write!(line, " (assist {})", self.player(assist));
                }
                let _ = write!(line, "  {} : {}", left_score, right_score);
                line
            }
            MatchEvent::Time { carrier } => format!("time! {} gives the disc away", self.player(carrier)),
        }
    }
}

pub fn match_summary(result: &MatchResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} : {} {}",
        result.left_name, result.left_score, result.right_score, result.right_name
    );
    let _ = writeln!(
        out,
        "Winner: {}  ({} sets, {} phases, {} turns)",
        result.winner_name(),
        result.sets_played,
        result.phases_played,
        result.turns_played
    );

    if !result.top_performers.is_empty() {
        let _ = writeln!(out, "\nTop performers");
        for top in &result.top_performers {
            let stats: Vec<String> = top.stats.iter().map(|(s, v)| format!("{} {}", s.as_str(), v)).collect();
            let _ = writeln!(out, "  {:<12} {}", top.name, stats.join(", "));
        }
    }

    if !result.ratings.is_empty() {
        let _ = writeln!(out, "\nRatings");
        let mut ratings: Vec<_> = result.ratings.iter().collect();
        ratings.sort_by(|a, b| b.score.rating.total_cmp(&a.score.rating));
        for r in ratings {
            let _ = writeln!(
                out,
                "  {:<12} {:>4.1}  (off {:.1}, def {:.1})",
                r.name, r.score.rating, r.score.offence, r.score.defence
            );
        }
    }
    out
}

pub fn standings(table: &LeagueTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<3} {:<12} {:>3} {:>3} {:>3} {:>4} {:>4} {:>6} {:>4}", "#", "Team", "P", "W", "L", "TD", "TA", "Ratio", "Pts");
    for (i, row) in table.standings().iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<3} {:<12} {:>3} {:>3} {:>3} {:>4} {:>4} {:>6} {:>4}",
            i + 1,
            row.name,
            row.played,
            row.won,
            row.lost,
            row.touchdowns,
            row.conceded,
            row.ratio,
            row.points
        );
    }
    out
}

/// Season leaders for a handful of headline stats.
pub fn season_leaders(registry: &Registry, limit: usize) -> String {
    const HEADLINE: [Stat; 4] = [Stat::Touchdowns, Stat::Assists, Stat::CarrierTakedowns, Stat::Evasions];

    let mut out = String::new();
    for stat in HEADLINE {
        let mut leaders: Vec<(&str, u32)> = registry
            .players()
            .iter()
            .map(|p| (p.name(), p.season_stats().get(stat)))
            .filter(|&(_, v)| v > 0)
            .collect();
        if leaders.is_empty() {
            continue;
        }
        leaders.sort_by(|a, b| b.1.cmp(&a.1));
        let line: Vec<String> = leaders.iter().take(limit).map(|(n, v)| format!("{} {}", n, v)).collect();
        let _ = writeln!(out, "{:<18} {}", stat.as_str(), line.join(", "));
    }

    let mut rated: Vec<(&str, f64)> =
        registry.players().iter().filter_map(|p| p.season_average().map(|a| (p.name(), a.rating))).collect();
    if !rated.is_empty() {
        rated.sort_by(|a, b| b.1.total_cmp(&a.1));
        let line: Vec<String> = rated.iter().take(limit).map(|(n, r)| format!("{} {:.2}", n, r)).collect();
        let _ = writeln!(out, "{:<18} {}", "season rating", line.join(", "));
    }
    out
}
