//! Decision seam of the match engine.
//!
//! The engine asks a [`MatchController`] at four points: the starting lineup,
//! a substitution when the gate is open, each shot target and the carrier's
//! dash-or-pass call. Every method defaults to the autonomous,
//! probability-weighted behaviour, so a controller only overrides the
//! decisions it takes over.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::selection;
use crate::error::Result;
use crate::models::{PlayerId, PlayerPool, Substitution, Team, TeamId};

/// The carrier's call after winning possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayChoice {
    /// Keep the disc and run with it.
    Dash,
    /// Throw to this teammate.
    Pass(PlayerId),
}

pub trait MatchController {
    /// Teams whose decisions this controller takes over.
    fn manages(&self, _team: TeamId) -> bool {
        false
    }

    /// New default starting order for `team`, or `None` to keep it.
    fn choose_lineup(&mut self, _team: &Team, _players: &PlayerPool) -> Result<Option<Vec<PlayerId>>> {
        Ok(None)
    }

    /// Called only while the team's substitution gate is open.
    fn choose_substitution(
        &mut self,
        team: &Team,
        _players: &PlayerPool,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Substitution>> {
        Ok(team.decide_substitution(rng))
    }

    fn choose_shot_target(
        &mut self,
        shooter: PlayerId,
        targets: &[PlayerId],
        players: &PlayerPool,
        rng: &mut dyn RngCore,
    ) -> Result<PlayerId> {
        selection::choose_target(players, shooter, targets, rng)
    }

    fn choose_dash_or_pass(
        &mut self,
        carrier: PlayerId,
        team: &Team,
        players: &PlayerPool,
        rng: &mut dyn RngCore,
    ) -> Result<PlayChoice> {
        selection::decide_dash_or_pass(players, carrier, team.lineup(), team.is_left(), rng)
    }
}

/// Fully autonomous matches: every decision is a weighted draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutonomousController;

impl MatchController for AutonomousController {}
