use thiserror::Error;

use crate::models::{PlayerId, TeamId};

/// Errors raised by the simulation core.
///
/// Most variants are invariant violations: the match state is not safely
/// continuable and the whole match unwinds. The rest come from setup
/// (rosters, ids) or from the human-input collaborator.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("zero distance between {first} and {second} at row {row}, column {column}")]
    ZeroDistance { first: String, second: String, row: i32, column: i32 },

    #[error("{player} is not on the field")]
    NotOnField { player: String },

    #[error("{player} has no lineup position assigned")]
    PositionUnassigned { player: String },

    #[error("{player} is out of bounds at row {row}, column {column}")]
    OutOfBounds { player: String, row: i32, column: i32 },

    #[error("no carrier while {context}")]
    NoCarrier { context: &'static str },

    #[error("carrier {player} is on neither team's roster")]
    CarrierNotOnRoster { player: String },

    #[error("weighted draw failed for {context}: {reason}")]
    InvalidDraw { context: &'static str, reason: String },

    #[error("{player} does not play for {team}")]
    NotOnRoster { player: String, team: String },

    #[error("player {0} was paired with itself")]
    SamePlayer(PlayerId),

    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown team id {0}")]
    UnknownTeam(TeamId),

    #[error("invalid team size for {team}: expected {expected}, found {found}")]
    InvalidTeamSize { team: String, expected: usize, found: usize },

    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    #[error("invalid match configuration: {0}")]
    InvalidConfig(String),

    #[error("human input closed before a selection was made")]
    InputClosed,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MatchError {
    /// True for the data/logic defects that must abort a match.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            MatchError::ZeroDistance { .. }
                | MatchError::NotOnField { .. }
                | MatchError::PositionUnassigned { .. }
                | MatchError::OutOfBounds { .. }
                | MatchError::NoCarrier { .. }
                | MatchError::CarrierNotOnRoster { .. }
                | MatchError::InvalidDraw { .. }
                | MatchError::NotOnRoster { .. }
                | MatchError::SamePlayer(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
