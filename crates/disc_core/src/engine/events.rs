use serde::{Deserialize, Serialize};

use super::field_board::FieldBoard;
use crate::models::{PlayerId, TeamId};

/// Notable moments of a match, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    SetStarted {
        set: u32,
        left_score: u8,
        right_score: u8,
    },
    Substitution {
        team: TeamId,
        out: PlayerId,
        into: PlayerId,
    },
    Possession {
        set: u32,
        phase: u32,
        carrier: PlayerId,
        team: TeamId,
    },
    Dash {
        carrier: PlayerId,
    },
    Pass {
        passer: PlayerId,
        catcher: PlayerId,
        completed: bool,
    },
    CarrierDown {
        carrier: PlayerId,
        by: PlayerId,
        turn: u32,
    },
    Touchdown {
        scorer: PlayerId,
        assist: Option<PlayerId>,
        team: TeamId,
        turn: u32,
        left_score: u8,
        right_score: u8,
    },
    Time {
        carrier: PlayerId,
    },
}

/// State of the match at the end of a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub set: u32,
    pub phase: u32,
    pub turn: u32,
    pub left_score: u8,
    pub right_score: u8,
    pub carrier: Option<PlayerId>,
    /// Every roster player of either team currently holding the disc.
    pub holders: Vec<PlayerId>,
    pub board: FieldBoard,
}

/// Receives events and per-turn snapshots while a match runs.
pub trait MatchObserver {
    fn on_event(&mut self, _event: &MatchEvent) {}

    fn on_turn(&mut self, _snapshot: &MatchSnapshot) {}
}
