//! Shared helpers for engine, model and player tests.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::events::{MatchEvent, MatchObserver, MatchSnapshot};
use super::interactive::HumanInput;
use crate::engine::constants::TEAM_SIZE;
use crate::error::{MatchError, Result};
use crate::models::{PlayerId, PlayerPool, Registry, RosterFile, TeamColor, TeamId};
use crate::player::{Attributes, Player};

// =============================================================================
// Players
// =============================================================================

/// A standalone player already on the field at `(row, column)`.
pub(crate) fn placed_player(id: u32, row: i32, column: i32, attributes: Attributes) -> Player {
    let mut player = Player::new(PlayerId(id), format!("P{}", id), TeamColor::White, attributes);
    player.place(row, column);
    player
}

/// A pool whose player `i` stands on `cells[i]`.
pub(crate) fn pool_with(cells: &[(i32, i32, Attributes)]) -> PlayerPool {
    let mut registry = Registry::new();
    for (i, &(row, column, attributes)) in cells.iter().enumerate() {
        let id = registry.add_player(format!("P{}", i), TeamColor::White, attributes);
        if let Ok(player) = registry.players_mut().get_mut(id) {
            player.place(row, column);
        }
    }
    registry.players().clone()
}

// =============================================================================
// Teams
// =============================================================================

/// Red vs Blue, every attribute of every player set to `value`.
pub(crate) fn uniform_registry(value: u8) -> (Registry, TeamId, TeamId) {
    let mut registry = Registry::new();
    let mut teams = Vec::new();
    for (name, color) in [("Reds", TeamColor::Red), ("Blues", TeamColor::Blue)] {
        let ids: Vec<PlayerId> = (0..TEAM_SIZE)
            .map(|i| registry.add_player(format!("{} {}", name, i + 1), color, Attributes::uniform(value)))
            .collect();
        teams.push(registry.add_team(name, color, ids).expect("fixture team"));
    }
    (registry, teams[0], teams[1])
}

/// Two generated teams from a seeded roster.
pub(crate) fn generated_registry(seed: u64) -> (Registry, TeamId, TeamId) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let roster = RosterFile::generate(&mut rng, 2).expect("fixture roster");
    let registry = Registry::from_roster(&roster).expect("fixture registry");
    (registry, TeamId(0), TeamId(1))
}

// =============================================================================
// Collaborators
// =============================================================================

/// Collects everything a match reports.
#[derive(Default)]
pub(crate) struct Recorder {
    pub events: Vec<MatchEvent>,
    pub snapshots: Vec<MatchSnapshot>,
}

impl MatchObserver for Recorder {
    fn on_event(&mut self, event: &MatchEvent) {
        self.events.push(event.clone());
    }

    fn on_turn(&mut self, snapshot: &MatchSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}

/// Replays canned answers; runs dry with `InputClosed`.
pub(crate) struct ScriptedInput {
    answers: VecDeque<usize>,
    prompts: Vec<(String, Vec<usize>)>,
    notes: Vec<String>,
}

impl ScriptedInput {
    pub fn new(answers: Vec<usize>) -> Self {
        Self { answers: answers.into(), prompts: Vec::new(), notes: Vec::new() }
    }

    pub fn prompts(&self) -> &[(String, Vec<usize>)] {
        &self.prompts
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }
}

impl HumanInput for ScriptedInput {
    fn choose(&mut self, prompt: &str, options: &[usize]) -> Result<usize> {
        self.prompts.push((prompt.to_string(), options.to_vec()));
        self.answers.pop_front().ok_or(MatchError::InputClosed)
    }

    fn notify(&mut self, message: &str) {
        self.notes.push(message.to_string());
    }
}
