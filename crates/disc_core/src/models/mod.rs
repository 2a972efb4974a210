//! Roster-level data: ids, colours, teams, roster files and the registry
//! that owns every player and team between matches.

mod color;
mod ids;
mod registry;
mod roster;
mod team;

pub use color::TeamColor;
pub use ids::{PlayerId, TeamId};
pub use registry::{PlayerPool, Registry};
pub use roster::{PlayerRecord, RosterFile, TeamRecord};
pub use team::{Substitution, Team};
