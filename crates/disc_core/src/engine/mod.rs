//! Match engine: the Match -> Set -> Phase -> Turn state machine, the
//! decision seam it consults, and the data it reports.
//!
//! ```text
//!  simulate ──► set ──► phase ──► creation contest ──► dash or pass
//!     ▲          ▲        ▲                                │
//!     │          │        └──── Drop / Time / failed pass ◄┤
//!     │          └───────────── Touchdown ◄──── turns ◄────┘
//!     └── until a score reaches points_for_win
//! ```

pub mod config;
pub mod constants;
pub mod controller;
pub mod events;
pub mod field_board;
pub mod interactive;
pub mod match_sim;
pub mod result;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use config::{MatchConfig, SubstitutionPolicy};
pub use controller::{AutonomousController, MatchController, PlayChoice};
pub use events::{MatchEvent, MatchObserver, MatchSnapshot};
pub use field_board::FieldBoard;
pub use interactive::{HumanInput, InteractiveController};
pub use match_sim::{Game, TurnOutcome};
pub use result::{MatchResult, PlayerRating, TopPerformer};
