//! Player gameplay state and individual action outcomes.
//!
//! A player owns its field state (slot, row, column, disc, delay, fatigue)
//! and its statistic lines. Contests between two players live in
//! [`contest`]; they borrow both sides mutably and are driven by the engine.

mod attributes;
mod contest;
mod performance;
mod stats;

pub use attributes::{roll, Attributes, ATTRIBUTE_MAX};
pub use performance::{PerformanceHistory, PerformanceScore, SEASON_MIN_RATED_MATCHES};
pub use stats::{Stat, StatLine};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::constants::{field, knockback, movement};
use crate::error::{MatchError, Result};
use crate::models::{PlayerId, TeamColor, TeamId};

/// Outcome of one [`Player::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Already on the scoring target; no movement.
    InScoringStrip,
    /// Delay flag consumed; no movement this turn.
    Delayed,
    /// Moved this many blocks towards the target.
    Moved(i32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    team: Option<TeamId>,
    color: TeamColor,
    attributes: Attributes,

    on_field: bool,
    position: Option<usize>,
    row: Option<i32>,
    column: Option<i32>,
    has_disc: bool,
    delay: bool,
    fatigue: u32,

    match_stats: StatLine,
    season_stats: StatLine,
    all_time_stats: StatLine,
    #[serde(default)]
    season_scores: PerformanceHistory,
    #[serde(default)]
    all_time_scores: PerformanceHistory,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: TeamColor, attributes: Attributes) -> Self {
        Self {
            id,
            name: name.into(),
            team: None,
            color,
            attributes: attributes.clamped(),
            on_field: false,
            position: None,
            row: None,
            column: None,
            has_disc: false,
            delay: false,
            fatigue: 0,
            match_stats: StatLine::new(),
            season_stats: StatLine::new(),
            all_time_stats: StatLine::new(),
            season_scores: PerformanceHistory::default(),
            all_time_scores: PerformanceHistory::default(),
        }
    }

    // ========== Identity / attributes ==========

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Option<TeamId> {
        self.team
    }

    pub(crate) fn set_team(&mut self, team: TeamId, color: TeamColor) {
        self.team = Some(team);
        self.color = color;
    }

    pub fn color(&self) -> TeamColor {
        self.color
    }

    /// Name wrapped in the team colour for console output.
    pub fn painted_name(&self) -> String {
        self.color.paint(&self.name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    // ========== Gameplay state ==========

    pub fn on_field(&self) -> bool {
        self.on_field
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub(crate) fn assign_position(&mut self, slot: usize) {
        self.position = Some(slot);
    }

    pub fn row(&self) -> Option<i32> {
        self.row
    }

    pub fn column(&self) -> Option<i32> {
        self.column
    }

    pub fn has_disc(&self) -> bool {
        self.has_disc
    }

    pub fn delay(&self) -> bool {
        self.delay
    }

    pub fn fatigue(&self) -> u32 {
        self.fatigue
    }

    /// `(row, column)` of an on-field player.
    pub fn cell(&self) -> Result<(i32, i32)> {
        match (self.on_field, self.row, self.column) {
            (true, Some(row), Some(column)) => Ok((row, column)),
            _ => Err(MatchError::NotOnField { player: self.name.clone() }),
        }
    }

    fn current_column(&self) -> Result<i32> {
        self.cell().map(|(_, column)| column)
    }

    /// Puts the player on the field at the starting column of its side.
    ///
    /// Requires a lineup slot assigned by the team.
    pub fn reset_position(&mut self, is_left: bool) -> Result<()> {
        let slot = self
            .position
            .ok_or_else(|| MatchError::PositionUnassigned { player: self.name.clone() })?;
        self.on_field = true;
        self.has_disc = false;
        self.delay = false;
        self.row = Some(slot as i32 * 2 + if is_left { 0 } else { 1 });
        self.column = Some(field::start(is_left));
        Ok(())
    }

    /// Drops the player on an exact cell, bypassing lineup resets.
    #[cfg(test)]
    pub(crate) fn place(&mut self, row: i32, column: i32) {
        self.on_field = true;
        self.position = Some((row / 2) as usize);
        self.row = Some(row);
        self.column = Some(column);
    }

    pub fn leave_field(&mut self) {
        self.on_field = false;
        self.position = None;
        self.row = None;
        self.column = None;
        self.has_disc = false;
        self.delay = false;
        self.fatigue = 0;
    }

    /// Moves one to three blocks towards the scoring target.
    pub fn advance<R: Rng + ?Sized>(&mut self, is_left: bool, rng: &mut R) -> Result<Movement> {
        let column = self.current_column()?;
        let target = field::target(is_left);

        if column == target {
            self.record(Stat::TurnsInTouchdownStrip, 1);
            return Ok(Movement::InScoringStrip);
        }
        if self.delay {
            self.delay = false;
            return Ok(Movement::Delayed);
        }

        self.fatigue += 1;
        let blocks = self.roll_blocks(rng).min((column - target).abs());
        self.column = Some(column + blocks * field::direction(is_left));
        self.record(Stat::DistanceCovered, blocks as u32);
        if self.has_disc {
            self.record(Stat::DistanceCarried, blocks as u32);
        }
        log::trace!("{} advanced {} -> {}", self.name, column, column + blocks * field::direction(is_left));
        Ok(Movement::Moved(blocks))
    }

    fn roll_blocks<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let run = roll(rng, self.attributes.speed as u32);
        if run > movement::THREE_BLOCK_ROLL {
            3
        } else if run > movement::TWO_BLOCK_ROLL {
            2
        } else {
            1
        }
    }

    pub fn touchdown(&mut self) {
        self.record(Stat::Touchdowns, 1);
    }

    /// Knockback for a balance roll against a shot quality.
    pub fn knockback_blocks(balance: u32, shot_quality: u32) -> i32 {
        use std::cmp::Ordering;
        match balance.cmp(&shot_quality) {
            Ordering::Greater => knockback::STEADY,
            Ordering::Equal => knockback::STAGGER,
            Ordering::Less => knockback::FLATTENED,
        }
    }

    /// Applies a knockback of `blocks`. Returns true if the player fell.
    ///
    /// A player falls when the knockback would carry it past its own
    /// boundary; otherwise it absorbs the hit and is pushed back.
    pub fn take_knockback(&mut self, blocks: i32, is_left: bool) -> Result<bool> {
        let column = self.current_column()?;
        let falls = if is_left {
            column <= blocks
        } else {
            field::RIGHT_BOUNDARY - column <= blocks
        };
        if falls {
            self.fall_down(is_left)?;
        } else {
            self.absorb(blocks, is_left, column);
        }
        Ok(falls)
    }

    fn fall_down(&mut self, is_left: bool) -> Result<()> {
        let from = self.column;
        self.record(Stat::HitsTaken, 1);
        self.record(Stat::BalanceLosses, 1);
        if self.has_disc {
            self.record(Stat::DropsMade, 1);
        }
        self.reset_position(is_left)?;
        self.delay = true;
        self.column = Some(field::start(is_left) - field::direction(is_left));
        log::trace!("{} fell from {:?} to {:?}", self.name, from, self.column);
        Ok(())
    }

    /// Takes a knockback that stops short of the own boundary. Fall (and,
    /// for the carrier, drop) avoidance is credited in tenths: the share of
    /// the room to the boundary the hit used up.
    fn absorb(&mut self, blocks: i32, is_left: bool, column: i32) {
        let room = if is_left { column - field::LEFT_BOUNDARY } else { field::RIGHT_BOUNDARY - column };
        let closeness = (blocks * knockback::AVOIDANCE_SCALE / room.max(1)) as u32;
        self.record(Stat::HitsTaken, 1);
        self.record(Stat::FallsAvoided, closeness);
        self.record(Stat::KnockbackAbsorbed, blocks as u32);
        if self.has_disc {
            self.record(Stat::DropsAvoided, closeness);
        }
        self.column = Some(column - blocks * field::direction(is_left));
        log::trace!("{} absorbed {} blocks, now at {:?}", self.name, blocks, self.column);
    }

    // ========== Disc possession ==========

    /// Wins the creation contest.
    pub fn create_disc(&mut self) {
        self.gain_disc();
        self.record(Stat::Creations, 1);
        if self.column.is_some_and(field::in_scoring_strip) {
            self.record(Stat::EndZoneCreations, 1);
        }
    }

    pub fn gain_disc(&mut self) {
        self.has_disc = true;
    }

    pub fn give_disc_away(&mut self) {
        self.has_disc = false;
    }

    /// Completed pass: credits the passer with the column gain.
    pub fn pass_disc(&mut self, gained_blocks: i32) {
        self.record(Stat::PassesMade, 1);
        self.record(Stat::DistancePassed, gained_blocks.max(0) as u32);
        self.give_disc_away();
    }

    pub fn catch_disc(&mut self) {
        self.record(Stat::CatchesMade, 1);
        self.gain_disc();
    }

    pub fn pass_fail(&mut self) {
        self.record(Stat::FailedPasses, 1);
    }

    pub fn catch_fail(&mut self) {
        self.record(Stat::FailedCatches, 1);
    }

    /// Keeps the disc and runs with it.
    pub fn dash(&mut self) {
        self.record(Stat::Dashes, 1);
    }

    pub(crate) fn credit_assist(&mut self) {
        self.record(Stat::Assists, 1);
    }

    pub(crate) fn credit_set_played(&mut self) {
        self.record(Stat::SetsPlayed, 1);
    }

    // ========== Geometry ==========

    /// Euclidean distance over `(row, column)`; zero is an invariant violation.
    pub fn distance_to(&self, other: &Player) -> Result<f64> {
        let (r1, c1) = self.cell()?;
        let (r2, c2) = other.cell()?;
        let dr = (r1 - r2) as f64;
        let dc = (c1 - c2) as f64;
        let distance = (dr * dr + dc * dc).sqrt();
        if distance == 0.0 {
            log::error!(
                "distance between {} and {} is zero (row {}, column {})",
                self.name,
                other.name,
                r1,
                c1
            );
            return Err(MatchError::ZeroDistance {
                first: self.name.clone(),
                second: other.name.clone(),
                row: r1,
                column: c1,
            });
        }
        Ok(distance)
    }

    /// How many blocks `other` is ahead of this player in the direction of
    /// attack; 0 if it is level or behind.
    pub fn compare_columns(&self, other: &Player, is_left: bool) -> Result<i32> {
        let difference = (other.current_column()? - self.current_column()?) * field::direction(is_left);
        Ok(difference.max(0))
    }

    pub fn distance_to_end_zone(&self, is_left: bool) -> Result<i32> {
        Ok((self.current_column()? - field::target(is_left)).abs())
    }

    // ========== Statistics ==========

    #[inline]
    fn record(&mut self, stat: Stat, amount: u32) {
        self.match_stats.increment(stat, amount);
    }

    pub fn match_stats(&self) -> &StatLine {
        &self.match_stats
    }

    pub fn season_stats(&self) -> &StatLine {
        &self.season_stats
    }

    pub fn all_time_stats(&self) -> &StatLine {
        &self.all_time_stats
    }

    pub fn current_match_stat(&self, stat: Stat) -> u32 {
        self.match_stats.get(stat)
    }

    pub(crate) fn reset_match_stats(&mut self) {
        self.match_stats.clear();
    }

    /// Adds the match line to the season and all-time lines, and the match
    /// rating to both histories when a set was played.
    pub(crate) fn commit_match_stats(&mut self) {
        self.season_stats.merge_from(&self.match_stats);
        self.all_time_stats.merge_from(&self.match_stats);
        if let Some(score) = self.performance() {
            self.season_scores.push(score);
            self.all_time_scores.push(score);
        }
    }

    pub(crate) fn reset_season_stats(&mut self) {
        self.season_stats.clear();
        self.season_scores.clear();
    }

    pub fn season_scores(&self) -> &PerformanceHistory {
        &self.season_scores
    }

    pub fn all_time_scores(&self) -> &PerformanceHistory {
        &self.all_time_scores
    }

    /// Season mean, reported once [`SEASON_MIN_RATED_MATCHES`] are rated.
    pub fn season_average(&self) -> Option<PerformanceScore> {
        self.season_scores.average(SEASON_MIN_RATED_MATCHES)
    }

    pub fn all_time_average(&self) -> Option<PerformanceScore> {
        self.all_time_scores.average(1)
    }

    /// Offence/defence/rating for the current match, if any set was played.
    pub fn performance(&self) -> Option<PerformanceScore> {
        PerformanceScore::assess(&self.match_stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::placed_player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reset_position_rows_and_columns() {
        let mut p = Player::new(PlayerId(0), "Avi", TeamColor::Red, Attributes::default());
        assert!(matches!(p.reset_position(true), Err(MatchError::PositionUnassigned { .. })));

        p.assign_position(3);
        p.reset_position(true).unwrap();
        assert_eq!(p.cell().unwrap(), (6, 1));

        p.reset_position(false).unwrap();
        assert_eq!(p.cell().unwrap(), (7, 20));
        assert!(p.on_field());
        assert!(!p.has_disc());
    }

    #[test]
    fn test_advance_stuck_in_scoring_strip() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut p = placed_player(0, 0, 10, Attributes::default());
        let movement = p.advance(true, &mut rng).unwrap();
        assert_eq!(movement, Movement::InScoringStrip);
        assert_eq!(p.column(), Some(10));
        assert_eq!(p.current_match_stat(Stat::TurnsInTouchdownStrip), 1);
        assert_eq!(p.fatigue(), 0);
    }

    #[test]
    fn test_advance_consumes_delay() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut p = placed_player(0, 0, 4, Attributes::default());
        p.delay = true;
        assert_eq!(p.advance(true, &mut rng).unwrap(), Movement::Delayed);
        assert!(!p.delay());
        assert_eq!(p.column(), Some(4));
    }

    #[test]
    fn test_advance_clamps_to_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut attrs = Attributes::default();
        attrs.speed = 100;
        for _ in 0..50 {
            let mut p = placed_player(0, 1, 12, attrs);
            let movement = p.advance(false, &mut rng).unwrap();
            assert_eq!(movement, Movement::Moved(1));
            assert_eq!(p.column(), Some(11));
        }
    }

    #[test]
    fn test_low_speed_moves_one_block() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut attrs = Attributes::default();
        attrs.speed = 33;
        let mut p = placed_player(0, 0, 1, attrs);
        for expected in 2..=10 {
            assert_eq!(p.advance(true, &mut rng).unwrap(), Movement::Moved(1));
            assert_eq!(p.column(), Some(expected));
        }
        assert_eq!(p.current_match_stat(Stat::DistanceCovered), 9);
        assert_eq!(p.fatigue(), 9);
    }

    #[test]
    fn test_carrier_records_distance_carried() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut p = placed_player(0, 0, 1, Attributes::default());
        p.gain_disc();
        let Movement::Moved(blocks) = p.advance(true, &mut rng).unwrap() else {
            panic!("expected movement");
        };
        assert_eq!(p.current_match_stat(Stat::DistanceCarried), blocks as u32);
    }

    #[test]
    fn test_forced_fall_from_column_two() {
        let mut p = placed_player(0, 0, 2, Attributes::default());
        p.gain_disc();
        let fell = p.take_knockback(knockback::STAGGER, true).unwrap();
        assert!(fell);
        assert_eq!(p.column(), Some(0));
        assert!(p.delay());
        assert!(!p.has_disc());
        assert_eq!(p.current_match_stat(Stat::DropsMade), 1);
        assert_eq!(p.current_match_stat(Stat::BalanceLosses), 1);
    }

    #[test]
    fn test_right_side_fall_lands_on_boundary() {
        let mut p = placed_player(0, 1, 18, Attributes::default());
        assert!(p.take_knockback(knockback::STAGGER, false).unwrap());
        assert_eq!(p.column(), Some(21));
    }

    #[test]
    fn test_avoidance_credit_grows_near_boundary() {
        let mut close = placed_player(0, 0, 3, Attributes::default());
        let mut far = placed_player(1, 0, 10, Attributes::default());
        assert!(!close.take_knockback(knockback::STEADY, true).unwrap());
        assert!(!far.take_knockback(knockback::STEADY, true).unwrap());
        assert_eq!(close.current_match_stat(Stat::FallsAvoided), 6);
        assert_eq!(far.current_match_stat(Stat::FallsAvoided), 2);
        assert_eq!(far.current_match_stat(Stat::DropsAvoided), 0);

        let mut right = placed_player(2, 1, 18, Attributes::default());
        assert!(!right.take_knockback(knockback::STEADY, false).unwrap());
        assert_eq!(right.column(), Some(20));
        assert_eq!(right.current_match_stat(Stat::FallsAvoided), 6);
    }

    #[test]
    fn test_absorb_pushes_back() {
        let mut p = placed_player(0, 0, 9, Attributes::default());
        p.gain_disc();
        assert!(!p.take_knockback(knockback::STAGGER, true).unwrap());
        assert_eq!(p.column(), Some(4));
        assert!(p.has_disc());
        // 5 of the 9 blocks to the boundary used up.
        assert_eq!(p.current_match_stat(Stat::FallsAvoided), 5);
        assert_eq!(p.current_match_stat(Stat::DropsAvoided), 5);
        assert_eq!(p.current_match_stat(Stat::KnockbackAbsorbed), 5);

        let mut q = placed_player(1, 1, 12, Attributes::default());
        assert!(!q.take_knockback(knockback::STEADY, false).unwrap());
        assert_eq!(q.column(), Some(14));
    }

    #[test]
    fn test_knockback_blocks() {
        assert_eq!(Player::knockback_blocks(9, 4), 2);
        assert_eq!(Player::knockback_blocks(4, 4), 5);
        assert_eq!(Player::knockback_blocks(0, 4), 10);
    }

    #[test]
    fn test_distance_zero_is_fatal() {
        let a = placed_player(0, 2, 5, Attributes::default());
        let b = placed_player(1, 2, 5, Attributes::default());
        let err = a.distance_to(&b).unwrap_err();
        assert!(matches!(err, MatchError::ZeroDistance { row: 2, column: 5, .. }));
        assert!(err.is_invariant_violation());

        let c = placed_player(2, 5, 9, Attributes::default());
        assert!((a.distance_to(&c).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_columns_and_end_zone() {
        let a = placed_player(0, 0, 4, Attributes::default());
        let b = placed_player(1, 2, 7, Attributes::default());
        assert_eq!(a.compare_columns(&b, true).unwrap(), 3);
        assert_eq!(b.compare_columns(&a, true).unwrap(), 0);
        assert_eq!(b.compare_columns(&a, false).unwrap(), 3);
        assert_eq!(a.distance_to_end_zone(true).unwrap(), 6);
        assert_eq!(b.distance_to_end_zone(false).unwrap(), 4);
    }

    #[test]
    fn test_off_field_player_has_no_cell() {
        let mut p = placed_player(0, 0, 3, Attributes::default());
        p.gain_disc();
        p.leave_field();
        assert!(matches!(p.cell(), Err(MatchError::NotOnField { .. })));
        assert!(!p.has_disc());
        assert_eq!(p.position(), None);
    }

    #[test]
    fn test_create_disc_in_strip() {
        let mut p = placed_player(0, 0, 10, Attributes::default());
        p.create_disc();
        assert!(p.has_disc());
        assert_eq!(p.current_match_stat(Stat::Creations), 1);
        assert_eq!(p.current_match_stat(Stat::EndZoneCreations), 1);
    }

    #[test]
    fn test_commit_match_stats() {
        let mut p = placed_player(0, 0, 10, Attributes::default());
        p.touchdown();
        p.commit_match_stats();
        p.reset_match_stats();
        p.touchdown();
        p.commit_match_stats();
        assert_eq!(p.season_stats().get(Stat::Touchdowns), 2);
        assert_eq!(p.all_time_stats().get(Stat::Touchdowns), 2);
        p.reset_season_stats();
        assert_eq!(p.season_stats().get(Stat::Touchdowns), 0);
        assert_eq!(p.all_time_stats().get(Stat::Touchdowns), 2);
    }

    #[test]
    fn test_commit_records_rating_history() {
        let mut p = placed_player(0, 0, 10, Attributes::default());
        p.commit_match_stats();
        assert!(p.season_scores().is_empty());

        for _ in 0..SEASON_MIN_RATED_MATCHES {
            p.reset_match_stats();
            p.record(Stat::SetsPlayed, 1);
            p.touchdown();
            p.commit_match_stats();
        }
        assert_eq!(p.season_scores().len(), SEASON_MIN_RATED_MATCHES);
        let score = p.season_scores().scores()[0];
        assert_eq!(p.season_average().map(|a| a.rating), Some((score.rating * 100.0).round() / 100.0));

        p.reset_season_stats();
        assert_eq!(p.season_average(), None);
        assert_eq!(p.all_time_scores().len(), SEASON_MIN_RATED_MATCHES);
        assert!(p.all_time_average().is_some());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any mix of advances and knockbacks keeps the player on the field.
            #[test]
            fn prop_column_stays_in_bounds(
                seed in any::<u64>(),
                is_left in any::<bool>(),
                offset in 0i32..10,
                speed in 0u8..=100,
                hits in proptest::collection::vec(prop_oneof![Just(0), Just(2), Just(5), Just(10)], 1..60),
            ) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let (row, column) = if is_left { (0, 1 + offset) } else { (1, 20 - offset) };
                let mut attributes = Attributes::default();
                attributes.speed = speed;
                let mut p = placed_player(0, row, column, attributes);

                for blocks in hits {
                    if blocks == 0 {
                        p.advance(is_left, &mut rng).unwrap();
                    } else {
                        p.take_knockback(blocks, is_left).unwrap();
                    }
                    let (_, column) = p.cell().unwrap();
                    prop_assert!((field::LEFT_BOUNDARY..=field::RIGHT_BOUNDARY).contains(&column));
                    if is_left {
                        prop_assert!(column <= field::LEFT_TARGET);
                    } else {
                        prop_assert!(column >= field::RIGHT_TARGET);
                    }
                }
            }
        }
    }
}
