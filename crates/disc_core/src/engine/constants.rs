//! Fixed rules of the disc game.
//!
//! Field geometry is a 10 x 22 grid: each lineup slot owns two rows (one per
//! side) and every player runs along its row towards the scoring strip.

/// Players on a team roster.
pub const TEAM_SIZE: usize = 8;
/// Active players per team; roster entries beyond this are the bench.
pub const LINEUP_SIZE: usize = 5;
/// Rows on the field board (one per lineup slot per side).
pub const FIELD_ROWS: usize = LINEUP_SIZE * 2;

pub mod field {
    /// Left boundary column (own end zone of the left-attacking team).
    pub const LEFT_BOUNDARY: i32 = 0;
    /// Right boundary column (own end zone of the right-attacking team).
    pub const RIGHT_BOUNDARY: i32 = 21;
    /// Columns on the board, boundaries included.
    pub const COLUMNS: usize = 22;
    /// Re-entry column for left-attacking players.
    pub const LEFT_START: i32 = 1;
    /// Re-entry column for right-attacking players.
    pub const RIGHT_START: i32 = 20;
    /// Scoring target of the left-attacking team.
    pub const LEFT_TARGET: i32 = 10;
    /// Scoring target of the right-attacking team.
    pub const RIGHT_TARGET: i32 = 11;

    /// True if `column` is in the scoring strip (10 or 11).
    #[inline]
    pub fn in_scoring_strip(column: i32) -> bool {
        column == LEFT_TARGET || column == RIGHT_TARGET
    }

    /// True if `column` is one of the two boundary columns.
    #[inline]
    pub fn is_boundary(column: i32) -> bool {
        column == LEFT_BOUNDARY || column == RIGHT_BOUNDARY
    }

    #[inline]
    pub fn target(is_left: bool) -> i32 {
        if is_left {
            LEFT_TARGET
        } else {
            RIGHT_TARGET
        }
    }

    #[inline]
    pub fn start(is_left: bool) -> i32 {
        if is_left {
            LEFT_START
        } else {
            RIGHT_START
        }
    }

    /// +1 for the left-attacking side, -1 for the right-attacking side.
    #[inline]
    pub fn direction(is_left: bool) -> i32 {
        if is_left {
            1
        } else {
            -1
        }
    }
}

pub mod movement {
    /// Speed roll above this moves three blocks.
    pub const THREE_BLOCK_ROLL: u32 = 66;
    /// Speed roll above this moves two blocks.
    pub const TWO_BLOCK_ROLL: u32 = 33;
}

pub mod knockback {
    /// Balance roll beat the shot.
    pub const STEADY: i32 = 2;
    /// Balance roll tied the shot.
    pub const STAGGER: i32 = 5;
    /// Balance roll lost to the shot.
    pub const FLATTENED: i32 = 10;
    /// Stability roll is divided by this before the comparison.
    pub const BALANCE_DIVISOR: u32 = 3;
    /// Fall/drop avoidance is credited in 1/AVOIDANCE_SCALE of a fall.
    pub const AVOIDANCE_SCALE: i32 = 10;
}

pub mod passing {
    /// Upper bound of the difficulty roll multiplied by pass distance.
    pub const DIFFICULTY_ROLL_MAX: u32 = 20;
    /// A pass roll above this share of the threshold is "well thrown".
    pub const WELL_THROWN_SHARE: f64 = 0.75;
    /// Catch boost for a well-thrown pass.
    pub const WELL_THROWN_CATCH_BOOST: f64 = 1.5;
}

pub mod targeting {
    /// Shot weight multiplier for the carrier.
    pub const CARRIER_WEIGHT: f64 = 5.0;
    /// Shot weight multiplier for a candidate in the scoring strip.
    pub const STRIP_WEIGHT: f64 = 2.0;
}

#[cfg(test)]
mod tests {
    use super::field;

    #[test]
    fn test_field_helpers() {
        assert!(field::in_scoring_strip(10));
        assert!(field::in_scoring_strip(11));
        assert!(!field::in_scoring_strip(12));
        assert!(field::is_boundary(0) && field::is_boundary(21));
        assert_eq!(field::target(true), 10);
        assert_eq!(field::target(false), 11);
        assert_eq!(field::start(true), 1);
        assert_eq!(field::start(false), 20);
        assert_eq!(field::direction(false), -1);
    }
}
