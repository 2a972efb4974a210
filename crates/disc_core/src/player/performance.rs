//! Match rating derived from a stat line.

use serde::{Deserialize, Serialize};

use super::{Stat, StatLine};

pub const RATING_MAX: f64 = 10.0;

/// Rated matches a player needs before a season average is reported.
pub const SEASON_MIN_RATED_MATCHES: usize = 5;

/// Offence/defence scores per set played, folded into a 0-10 rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    pub offence: f64,
    pub defence: f64,
    pub rating: f64,
}

impl PerformanceScore {
    /// `None` for a player who did not play a set.
    pub fn assess(stats: &StatLine) -> Option<Self> {
        let sets = stats.get(Stat::SetsPlayed);
        if sets == 0 {
            return None;
        }
        let s = |stat: Stat| stats.get(stat) as f64;
        let sets = sets as f64;

        let touchdowns = s(Stat::Touchdowns);
        let drops = s(Stat::DropsMade);
        let mut offence = 10.0 * touchdowns;
        offence += s(Stat::Creations) - touchdowns - drops;
        offence += s(Stat::DistanceCarried) / 4.0;
        offence += s(Stat::CarrierEvasions) / 2.0;
        offence -= drops / 2.0;
        let offence = offence.max(0.0) / sets;

        let last_ditch_takedowns = s(Stat::LastDitchTakedowns);
        let carrier_takedowns = s(Stat::CarrierTakedowns);
        let takedowns = s(Stat::SuccessfulTakedowns);
        let last_ditch_hits = s(Stat::LastDitchHits);
        let mut defence = 10.0 * last_ditch_takedowns;
        defence += 7.0 * (carrier_takedowns - last_ditch_takedowns);
        defence += 3.0 * (takedowns - carrier_takedowns);
        defence += last_ditch_hits - last_ditch_takedowns;
        defence += (s(Stat::SuccessfulShots) - takedowns - last_ditch_hits) / 2.0;
        let defence = defence.max(0.0) / sets * 1.5;

        let total = offence + defence + offence.max(defence);
        Some(Self { offence, defence, rating: fold_rating(total) })
    }
}

/// Scores of every rated match over a season or a career.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    scores: Vec<PerformanceScore>,
}

impl PerformanceHistory {
    pub fn scores(&self) -> &[PerformanceScore] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub(crate) fn push(&mut self, score: PerformanceScore) {
        self.scores.push(score);
    }

    pub(crate) fn clear(&mut self) {
        self.scores.clear();
    }

    /// Component-wise mean rounded to two decimals, or `None` with fewer than
    /// `min_matches` rated matches (or none at all).
    pub fn average(&self, min_matches: usize) -> Option<PerformanceScore> {
        if self.scores.is_empty() || self.scores.len() < min_matches {
            return None;
        }
        let n = self.scores.len() as f64;
        let mean = |part: fn(&PerformanceScore) -> f64| round2(self.scores.iter().map(part).sum::<f64>() / n);
        Some(PerformanceScore {
            offence: mean(|s| s.offence),
            defence: mean(|s| s.defence),
            rating: mean(|s| s.rating),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compresses the raw total into the 0-10 scale: linear at the bottom,
/// half-point steps up to 7.5, then increasingly slow growth.
fn fold_rating(total: f64) -> f64 {
    let rating = if total < 5.0 {
        total.trunc()
    } else if total <= 7.5 {
        (total * 2.0).trunc() / 2.0
    } else if total <= 12.0 {
        7.5 + ((total % 7.5) + 1.0).trunc() / 5.0
    } else {
        8.5 + ((total % 12.0) + 1.0).trunc() / 10.0
    };
    rating.min(RATING_MAX)
}
