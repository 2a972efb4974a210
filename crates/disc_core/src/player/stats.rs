//! Per-player statistic counters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named statistic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    SetsPlayed,
    DistanceCovered,
    DistanceCarried,
    DistancePassed,
    Touchdowns,
    TurnsInTouchdownStrip,
    Creations,
    EndZoneCreations,
    Evasions,
    CarrierEvasions,
    SuccessfulShots,
    SuccessfulTakedowns,
    LastDitchHits,
    LastDitchTakedowns,
    CarrierTakedowns,
    CarrierHits,
    HitsTaken,
    BalanceLosses,
    DropsMade,
    FallsAvoided,
    DropsAvoided,
    KnockbackAbsorbed,
    PassesMade,
    CatchesMade,
    Assists,
    FailedPasses,
    FailedCatches,
    Dashes,
}

impl Stat {
    pub const ALL: [Stat; 28] = [
        Stat::SetsPlayed,
        Stat::DistanceCovered,
        Stat::DistanceCarried,
        Stat::DistancePassed,
        Stat::Touchdowns,
        Stat::TurnsInTouchdownStrip,
        Stat::Creations,
        Stat::EndZoneCreations,
        Stat::Evasions,
        Stat::CarrierEvasions,
        Stat::SuccessfulShots,
        Stat::SuccessfulTakedowns,
        Stat::LastDitchHits,
        Stat::LastDitchTakedowns,
        Stat::CarrierTakedowns,
        Stat::CarrierHits,
        Stat::HitsTaken,
        Stat::BalanceLosses,
        Stat::DropsMade,
        Stat::FallsAvoided,
        Stat::DropsAvoided,
        Stat::KnockbackAbsorbed,
        Stat::PassesMade,
        Stat::CatchesMade,
        Stat::Assists,
        Stat::FailedPasses,
        Stat::FailedCatches,
        Stat::Dashes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stat::SetsPlayed => "sets_played",
            Stat::DistanceCovered => "distance_covered",
            Stat::DistanceCarried => "distance_carried",
            Stat::DistancePassed => "distance_passed",
            Stat::Touchdowns => "touchdowns",
            Stat::TurnsInTouchdownStrip => "turns_in_touchdown_strip",
            Stat::Creations => "creations",
            Stat::EndZoneCreations => "end_zone_creations",
            Stat::Evasions => "evasions",
            Stat::CarrierEvasions => "carrier_evasions",
            Stat::SuccessfulShots => "successful_shots",
            Stat::SuccessfulTakedowns => "successful_takedowns",
            Stat::LastDitchHits => "last_ditch_hits",
            Stat::LastDitchTakedowns => "last_ditch_takedowns",
            Stat::CarrierTakedowns => "carrier_takedowns",
            Stat::CarrierHits => "carrier_hits",
            Stat::HitsTaken => "hits_taken",
            Stat::BalanceLosses => "balance_losses",
            Stat::DropsMade => "drops_made",
            Stat::FallsAvoided => "falls_avoided",
            Stat::DropsAvoided => "drops_avoided",
            Stat::KnockbackAbsorbed => "knockback_absorbed",
            Stat::PassesMade => "passes_made",
            Stat::CatchesMade => "catches_made",
            Stat::Assists => "assists",
            Stat::FailedPasses => "failed_passes",
            Stat::FailedCatches => "failed_catches",
            Stat::Dashes => "dashes",
        }
    }

    /// Stats that describe participation rather than performance; the
    /// top-performer summary skips them.
    pub fn is_bookkeeping(self) -> bool {
        matches!(self, Stat::SetsPlayed)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of counters. Missing entries read as zero.
///
/// Outside this crate the line is read-only; the engine is the only writer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    counters: BTreeMap<Stat, u32>,
}

impl StatLine {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, stat: Stat) -> u32 {
        self.counters.get(&stat).copied().unwrap_or(0)
    }

    pub(crate) fn increment(&mut self, stat: Stat, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.counters.entry(stat).or_insert(0) += amount;
    }

    pub(crate) fn merge_from(&mut self, other: &StatLine) {
        for (&stat, &value) in &other.counters {
            self.increment(stat, value);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.counters.clear();
    }

    /// Non-zero counters in `Stat` order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        self.counters.iter().filter(|(_, &v)| v > 0).map(|(&s, &v)| (s, v))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_get() {
        let mut line = StatLine::new();
        assert_eq!(line.get(Stat::Touchdowns), 0);
        line.increment(Stat::Touchdowns, 1);
        line.increment(Stat::Touchdowns, 2);
        line.increment(Stat::Dashes, 0);
        assert_eq!(line.get(Stat::Touchdowns), 3);
        assert_eq!(line.iter().count(), 1);
    }

    #[test]
    fn test_merge_and_clear() {
        let mut season = StatLine::new();
        let mut game = StatLine::new();
        game.increment(Stat::PassesMade, 4);
        game.increment(Stat::Evasions, 1);
        season.increment(Stat::PassesMade, 1);

        season.merge_from(&game);
        assert_eq!(season.get(Stat::PassesMade), 5);
        assert_eq!(season.get(Stat::Evasions), 1);

        game.clear();
        assert!(game.is_empty());
    }

    #[test]
    fn test_all_names_unique() {
        let mut names: Vec<&str> = Stat::ALL.iter().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Stat::ALL.len());
    }

    #[test]
    fn test_stat_line_serde_uses_names() {
        let mut line = StatLine::new();
        line.increment(Stat::LastDitchTakedowns, 2);
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("last_ditch_takedowns"));
        let parsed: StatLine = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, line);
    }
}
