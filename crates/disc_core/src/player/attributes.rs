//! Fixed ability attributes.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Mean of generated attributes.
pub const GENERATED_MEAN: f64 = 65.0;
/// Standard deviation of generated attributes.
pub const GENERATED_STD_DEV: f64 = 15.0;
pub const ATTRIBUTE_MAX: u8 = 100;

/// Eight ability attributes in `[0, 100]`, immutable once a player exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub speed: u8,
    pub agility: u8,
    pub creating: u8,
    pub shooting: u8,
    pub stability: u8,
    pub distribution: u8,
    pub control: u8,
    pub stamina: u8,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(GENERATED_MEAN as u8)
    }
}

impl Attributes {
    /// Every attribute set to `value` (clamped to 100).
    pub fn uniform(value: u8) -> Self {
        let v = value.min(ATTRIBUTE_MAX);
        Self {
            speed: v,
            agility: v,
            creating: v,
            shooting: v,
            stability: v,
            distribution: v,
            control: v,
            stamina: v,
        }
    }

    /// Draws each attribute from N(65, 15), rounded and clamped to `[0, 100]`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut draw = || {
            let n: f64 = StandardNormal.sample(rng);
            (GENERATED_MEAN + n * GENERATED_STD_DEV).round().clamp(0.0, ATTRIBUTE_MAX as f64) as u8
        };
        Self {
            speed: draw(),
            agility: draw(),
            creating: draw(),
            shooting: draw(),
            stability: draw(),
            distribution: draw(),
            control: draw(),
            stamina: draw(),
        }
    }

    /// Clamps out-of-range values coming from external roster data.
    pub fn clamped(self) -> Self {
        let c = |v: u8| v.min(ATTRIBUTE_MAX);
        Self {
            speed: c(self.speed),
            agility: c(self.agility),
            creating: c(self.creating),
            shooting: c(self.shooting),
            stability: c(self.stability),
            distribution: c(self.distribution),
            control: c(self.control),
            stamina: c(self.stamina),
        }
    }

    pub fn as_array(&self) -> [u8; 8] {
        [
            self.speed,
            self.agility,
            self.creating,
            self.shooting,
            self.stability,
            self.distribution,
            self.control,
            self.stamina,
        ]
    }

    /// Rough market value from the attribute profile.
    ///
    /// Ordinary attributes are worth nothing; each attribute above 65 adds a
    /// stepped premium that grows steeply past 90.
    pub fn value(&self) -> u32 {
        self.as_array().iter().map(|&a| attribute_value(a)).sum()
    }
}

fn attribute_value(attribute: u8) -> u32 {
    match attribute {
        0..=64 => 0,
        65..=74 => 2,
        75..=79 => 5,
        80..=84 => 15,
        85..=89 => 25,
        high => 30 + (high as u32 - 90) * 5,
    }
}

/// Uniform integer roll in `[1, max]`, with a zero attribute treated as 1.
#[inline]
pub fn roll<R: Rng + ?Sized>(rng: &mut R, max: u32) -> u32 {
    rng.gen_range(1..=max.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generated_attributes_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut sum = 0u64;
        let n = 2000;
        for _ in 0..n {
            let attrs = Attributes::generate(&mut rng);
            for a in attrs.as_array() {
                assert!(a <= ATTRIBUTE_MAX);
                sum += a as u64;
            }
        }
        let mean = sum as f64 / (n * 8) as f64;
        assert!((mean - GENERATED_MEAN).abs() < 2.0, "mean drifted: {}", mean);
    }

    #[test]
    fn test_roll_handles_zero_attribute() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(roll(&mut rng, 0), 1);
            let r = roll(&mut rng, 6);
            assert!((1..=6).contains(&r));
        }
    }

    #[test]
    fn test_value_steps() {
        assert_eq!(Attributes::uniform(60).value(), 0);
        assert_eq!(Attributes::uniform(70).value(), 16);
        assert_eq!(Attributes::uniform(92).value(), 8 * 40);
    }

    #[test]
    fn test_clamped() {
        let mut attrs = Attributes::uniform(50);
        attrs.speed = 250;
        assert_eq!(attrs.clamped().speed, 100);
    }
}
