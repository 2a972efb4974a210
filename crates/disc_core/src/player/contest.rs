//! Two-player contests: shooting/evasion and passing.

use rand::Rng;

use super::{roll, Player, Stat};
use crate::engine::constants::{field, knockback, passing};
use crate::error::Result;

impl Player {
    /// Resolves one shot from `shooter` at `target`. Returns true if the
    /// target fell.
    ///
    /// Shot quality is the shooting roll divided by the distance between the
    /// two; the target evades when its agility roll matches or beats it.
    pub fn face_off<R: Rng + ?Sized>(
        shooter: &mut Player,
        target: &mut Player,
        target_is_left: bool,
        rng: &mut R,
    ) -> Result<bool> {
        let distance = shooter.distance_to(target)?;
        let shot_quality =
            (roll(rng, shooter.attributes.shooting as u32) as f64 / distance).floor() as u32;
        let evasion_attempt = roll(rng, target.attributes.agility as u32);

        if shot_quality <= evasion_attempt {
            target.evade();
            log::trace!("{} evaded {} ({} <= {})", target.name, shooter.name, shot_quality, evasion_attempt);
            return Ok(false);
        }

        let target_carried = target.has_disc;
        let target_column = target.current_column()?;
        shooter.hit_target(target_carried, target_column);
        let fell = target.retreat(shot_quality, target_is_left, rng)?;
        if fell {
            shooter.takedown(target_carried, target_column);
        }
        log::trace!(
            "{} hit {} with quality {}{}",
            shooter.name,
            target.name,
            shot_quality,
            if fell { " and took them down" } else { "" }
        );
        Ok(fell)
    }

    /// Balance roll against a shot, then the resulting knockback. Returns true
    /// on a fall.
    pub fn retreat<R: Rng + ?Sized>(&mut self, shot_quality: u32, is_left: bool, rng: &mut R) -> Result<bool> {
        let balance_attempt = roll(rng, self.attributes.stability as u32) / knockback::BALANCE_DIVISOR;
        let blocks = Player::knockback_blocks(balance_attempt, shot_quality);
        self.take_knockback(blocks, is_left)
    }

    /// Throws the disc from `passer` to `catcher`. Returns true on a catch.
    ///
    /// The passer loses the disc either way. A well-thrown pass (beating
    /// three quarters of the threshold) boosts the catch roll by half.
    pub fn pass_play<R: Rng + ?Sized>(
        passer: &mut Player,
        catcher: &mut Player,
        is_left: bool,
        rng: &mut R,
    ) -> Result<bool> {
        let pass_attempt = roll(rng, passer.attributes.distribution as u32) as f64;
        let mut catch_attempt = roll(rng, catcher.attributes.control as u32) as f64;
        let distance = passer.distance_to(catcher)?;
        let threshold = roll(rng, passing::DIFFICULTY_ROLL_MAX) as f64 * distance;

        if pass_attempt > passing::WELL_THROWN_SHARE * threshold {
            catch_attempt *= passing::WELL_THROWN_CATCH_BOOST;
        }

        if pass_attempt + catch_attempt >= threshold {
            let gained = passer.compare_columns(catcher, is_left)?;
            passer.pass_disc(gained);
            catcher.catch_disc();
            log::debug!("{} passed to {} (+{} blocks)", passer.name, catcher.name, gained);
            Ok(true)
        } else {
            passer.pass_fail();
            passer.give_disc_away();
            catcher.catch_fail();
            log::debug!(
                "{} missed {} ({:.1} + {:.1} < {:.1})",
                passer.name,
                catcher.name,
                pass_attempt,
                catch_attempt,
                threshold
            );
            Ok(false)
        }
    }

    fn evade(&mut self) {
        self.record(Stat::Evasions, 1);
        if self.has_disc {
            self.record(Stat::CarrierEvasions, 1);
        }
    }

    fn hit_target(&mut self, target_has_disc: bool, target_column: i32) {
        self.record(Stat::SuccessfulShots, 1);
        if target_has_disc {
            self.record(Stat::CarrierHits, 1);
            if field::in_scoring_strip(target_column) {
                self.record(Stat::LastDitchHits, 1);
            }
        }
    }

    fn takedown(&mut self, target_has_disc: bool, target_column: i32) {
        self.record(Stat::SuccessfulTakedowns, 1);
        if target_has_disc {
            self.record(Stat::CarrierTakedowns, 1);
            if field::in_scoring_strip(target_column) {
                self.record(Stat::LastDitchTakedowns, 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::placed_player;
    use crate::error::MatchError;
    use crate::player::Attributes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_face_off_bookkeeping_balances() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 400;
        let mut falls = 0;
        let mut shooter = placed_player(0, 1, 12, Attributes::uniform(90));
        for _ in 0..trials {
            let mut target = placed_player(1, 0, 9, Attributes::uniform(40));
            if Player::face_off(&mut shooter, &mut target, true, &mut rng).unwrap() {
                falls += 1;
                assert_eq!(target.column(), Some(0));
                assert!(target.delay());
            }
            let evaded = target.current_match_stat(Stat::Evasions);
            let hit = target.current_match_stat(Stat::HitsTaken);
            assert_eq!(evaded + hit, 1);
        }
        let stats = shooter.match_stats();
        assert_eq!(stats.get(Stat::SuccessfulTakedowns), falls);
        assert!(stats.get(Stat::SuccessfulShots) >= falls);
        assert!(stats.get(Stat::SuccessfulShots) > 0, "a 90-shooter at distance ~3 should land shots");
    }

    #[test]
    fn test_carrier_takedown_credits() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let shooter_attrs = Attributes::uniform(100);
        let mut target_attrs = Attributes::uniform(0);
        target_attrs.agility = 1;
        target_attrs.stability = 1;

        let mut shooter = placed_player(0, 1, 10, shooter_attrs);
        let mut carrier_falls = 0;
        for _ in 0..200 {
            // Adjacent carrier in the strip: quality is the full roll.
            let mut target = placed_player(1, 0, 10, target_attrs);
            target.gain_disc();
            if Player::face_off(&mut shooter, &mut target, true, &mut rng).unwrap() {
                carrier_falls += 1;
                assert!(!target.has_disc());
                assert_eq!(target.current_match_stat(Stat::DropsMade), 1);
            }
        }
        let stats = shooter.match_stats();
        assert!(carrier_falls > 150);
        assert_eq!(stats.get(Stat::CarrierTakedowns), carrier_falls);
        assert_eq!(stats.get(Stat::LastDitchTakedowns), carrier_falls);
        assert_eq!(stats.get(Stat::LastDitchHits), stats.get(Stat::CarrierHits));
    }

    #[test]
    fn test_face_off_same_cell_is_fatal() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut a = placed_player(0, 3, 6, Attributes::default());
        let mut b = placed_player(1, 3, 6, Attributes::default());
        let err = Player::face_off(&mut a, &mut b, true, &mut rng).unwrap_err();
        assert!(matches!(err, MatchError::ZeroDistance { .. }));
    }

    #[test]
    fn test_pass_play_moves_disc() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut completed = 0;
        let mut failed = 0;
        for _ in 0..300 {
            let mut passer = placed_player(0, 0, 4, Attributes::uniform(80));
            let mut catcher = placed_player(1, 2, 7, Attributes::uniform(80));
            passer.gain_disc();
            let ok = Player::pass_play(&mut passer, &mut catcher, true, &mut rng).unwrap();
            assert!(!passer.has_disc());
            assert_eq!(catcher.has_disc(), ok);
            if ok {
                completed += 1;
                assert_eq!(passer.current_match_stat(Stat::DistancePassed), 3);
                assert_eq!(catcher.current_match_stat(Stat::CatchesMade), 1);
            } else {
                failed += 1;
                assert_eq!(passer.current_match_stat(Stat::FailedPasses), 1);
                assert_eq!(catcher.current_match_stat(Stat::FailedCatches), 1);
            }
        }
        assert!(completed > 0 && failed > 0, "completed={} failed={}", completed, failed);
    }

    #[test]
    fn test_short_pass_by_skilled_players_always_completes() {
        // Distance 2 keeps the threshold at or below 40, so misses are rare.
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut completed = 0;
        for _ in 0..500 {
            let mut passer = placed_player(0, 0, 5, Attributes::uniform(100));
            let mut catcher = placed_player(1, 2, 5, Attributes::uniform(100));
            passer.gain_disc();
            if Player::pass_play(&mut passer, &mut catcher, false, &mut rng).unwrap() {
                completed += 1;
                assert_eq!(passer.current_match_stat(Stat::DistancePassed), 0);
            }
        }
        assert!(completed > 460, "completed {}", completed);
    }

    #[test]
    fn test_retreat_with_overwhelming_shot_falls_near_boundary() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut p = placed_player(0, 0, 3, Attributes::uniform(30));
        // stability roll / 3 <= 10 < 1000, so knockback is 10 blocks.
        assert!(p.retreat(1000, true, &mut rng).unwrap());
        assert_eq!(p.column(), Some(0));
    }
}
