//! Match configuration.
//!
//! Fixed rules of the game live in [`constants`](super::constants); this
//! holds what a league or a test may tune.
//!
//! ```rust
//! use disc_core::engine::config::MatchConfig;
//!
//! let config = MatchConfig::default();
//! let quick = MatchConfig::quick();
//! assert!(quick.points_for_win < config.points_for_win);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// When a team's substitution gate opens at the start of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubstitutionPolicy {
    /// Both gates open when the combined score is a positive multiple of
    /// `every`.
    ScoreCheckpoint { every: u8 },
    /// Every set, but only for teams the controller manages.
    ManagedTeamOnly,
    Disabled,
}

impl Default for SubstitutionPolicy {
    fn default() -> Self {
        SubstitutionPolicy::ScoreCheckpoint { every: 3 }
    }
}

impl SubstitutionPolicy {
    /// Whether a gate opens for a team at a set start with this combined
    /// score.
    pub fn opens(&self, combined_score: u8, managed: bool) -> bool {
        match *self {
            SubstitutionPolicy::ScoreCheckpoint { every } => {
                every > 0 && combined_score > 0 && combined_score % every == 0
            }
            SubstitutionPolicy::ManagedTeamOnly => managed,
            SubstitutionPolicy::Disabled => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Touchdowns that win the match.
    pub points_for_win: u8,
    /// Turns before a phase ends in Time.
    pub max_turns_per_phase: u32,
    pub substitution: SubstitutionPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { points_for_win: 10, max_turns_per_phase: 10, substitution: SubstitutionPolicy::default() }
    }
}

impl MatchConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    /// Short matches for tests and demos.
    pub fn quick() -> Self {
        Self { points_for_win: 3, ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.points_for_win == 0 {
            return Err(MatchError::InvalidConfig("points_for_win must be at least 1".into()));
        }
        if self.max_turns_per_phase == 0 {
            return Err(MatchError::InvalidConfig("max_turns_per_phase must be at least 1".into()));
        }
        if let SubstitutionPolicy::ScoreCheckpoint { every: 0 } = self.substitution {
            return Err(MatchError::InvalidConfig("substitution checkpoint must be at least 1".into()));
        }
        Ok(())
    }
}
