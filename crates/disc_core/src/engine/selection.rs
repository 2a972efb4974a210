//! Probability-weighted choices made on behalf of autonomous players.
//!
//! All draws go through [`weighted_pick`]; an empty candidate list or an
//! all-zero weight vector is an invariant violation, never a silent default.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::constants::{field, targeting};
use super::controller::PlayChoice;
use crate::error::{MatchError, Result};
use crate::models::{PlayerId, PlayerPool};

/// Index drawn with probability proportional to `weights[i]`.
pub fn weighted_pick<R: Rng + ?Sized>(weights: &[f64], context: &'static str, rng: &mut R) -> Result<usize> {
    let distribution: WeightedIndex<f64> = WeightedIndex::new(weights).map_err(|e| {
        log::error!("weighted draw for {} failed over {:?}: {}", context, weights, e);
        MatchError::InvalidDraw { context, reason: e.to_string() }
    })?;
    Ok(distribution.sample(rng))
}

// ========== Creation contest ==========

/// On-field players eligible for the creation contest: everyone not standing
/// on a boundary column.
pub fn creation_candidates(players: &PlayerPool, lineup: impl IntoIterator<Item = PlayerId>) -> Result<Vec<PlayerId>> {
    let mut candidates = Vec::new();
    for id in lineup {
        let player = players.get(id)?;
        if !player.on_field() {
            continue;
        }
        let (_, column) = player.cell()?;
        if !field::is_boundary(column) {
            candidates.push(id);
        }
    }
    Ok(candidates)
}

pub fn creation_weights(players: &PlayerPool, candidates: &[PlayerId]) -> Result<Vec<f64>> {
    candidates
        .iter()
        .map(|&id| Ok(players.get(id)?.attributes().creating as f64))
        .collect()
}

pub fn pick_creator<R: Rng + ?Sized>(players: &PlayerPool, candidates: &[PlayerId], rng: &mut R) -> Result<PlayerId> {
    let weights = creation_weights(players, candidates)?;
    let index = weighted_pick(&weights, "creation contest", rng)?;
    Ok(candidates[index])
}

// ========== Shot targets ==========

/// Weight 1, x5 for the carrier, x2 inside the scoring strip, divided by the
/// distance from the shooter.
pub fn shot_target_weights(players: &PlayerPool, shooter: PlayerId, candidates: &[PlayerId]) -> Result<Vec<f64>> {
    let shooter = players.get(shooter)?;
    candidates
        .iter()
        .map(|&id| {
            let rival = players.get(id)?;
            let (_, column) = rival.cell()?;
            let mut weight = 1.0;
            if rival.has_disc() {
                weight *= targeting::CARRIER_WEIGHT;
            }
            if field::in_scoring_strip(column) {
                weight *= targeting::STRIP_WEIGHT;
            }
            Ok(weight / shooter.distance_to(rival)?)
        })
        .collect()
}

pub fn choose_target<R: Rng + ?Sized>(
    players: &PlayerPool,
    shooter: PlayerId,
    candidates: &[PlayerId],
    rng: &mut R,
) -> Result<PlayerId> {
    let weights = shot_target_weights(players, shooter, candidates)?;
    let index = weighted_pick(&weights, "shot target", rng)?;
    Ok(candidates[index])
}

// ========== Dash or pass ==========

/// Weights over `lineup` (the carrier included, standing for a dash).
///
/// Each teammate's column advantage over the carrier is normalised by the
/// largest one; the carrier counts as the maximum. Weights are then scaled by
/// the inverse distance to the end zone and to the carrier. `None` when no
/// teammate is ahead, meaning the carrier always dashes.
pub fn pass_target_weights(
    players: &PlayerPool,
    carrier: PlayerId,
    lineup: &[PlayerId],
    is_left: bool,
) -> Result<Option<Vec<f64>>> {
    let holder = players.get(carrier)?;
    let mut advantages = Vec::with_capacity(lineup.len());
    for &id in lineup {
        if id == carrier {
            advantages.push(None);
        } else {
            advantages.push(Some(holder.compare_columns(players.get(id)?, is_left)?));
        }
    }
    let max_advantage = advantages.iter().flatten().copied().max().unwrap_or(0);
    if max_advantage == 0 {
        return Ok(None);
    }

    let mut weights = Vec::with_capacity(lineup.len());
    for (&id, advantage) in lineup.iter().zip(&advantages) {
        let candidate = players.get(id)?;
        let block_advantage = match advantage {
            Some(blocks) => *blocks as f64 / max_advantage as f64,
            None => 1.0,
        };
        let to_end_zone = candidate.distance_to_end_zone(is_left)?;
        let end_zone_factor = if to_end_zone == 0 { 1.0 } else { 1.0 / to_end_zone as f64 };
        let carrier_factor = if id == carrier { 1.0 } else { 1.0 / candidate.distance_to(holder)? };
        weights.push(block_advantage * end_zone_factor * carrier_factor);
    }
    Ok(Some(weights))
}

pub fn decide_dash_or_pass<R: Rng + ?Sized>(
    players: &PlayerPool,
    carrier: PlayerId,
    lineup: &[PlayerId],
    is_left: bool,
    rng: &mut R,
) -> Result<PlayChoice> {
    let Some(weights) = pass_target_weights(players, carrier, lineup, is_left)? else {
        return Ok(PlayChoice::Dash);
    };
    let chosen = lineup[weighted_pick(&weights, "pass target", rng)?];
    Ok(if chosen == carrier { PlayChoice::Dash } else { PlayChoice::Pass(chosen) })
}
