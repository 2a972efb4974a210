use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{PlayerId, PlayerPool, TeamColor, TeamId};
use crate::engine::constants::{field, LINEUP_SIZE, TEAM_SIZE};
use crate::error::{MatchError, Result};

/// One lineup player swapped for one bench player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub out: PlayerId,
    pub into: PlayerId,
}

/// A team: roster order, side of the field and the substitution gate.
///
/// The first [`LINEUP_SIZE`] roster entries are the lineup; the rest sit on
/// the bench. Players themselves live in the [`PlayerPool`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    color: TeamColor,
    roster: Vec<PlayerId>,
    default_starting_roster_ids: Vec<PlayerId>,
    is_left: bool,
    can_substitute: bool,
}

impl Team {
    pub(crate) fn new(id: TeamId, name: impl Into<String>, color: TeamColor, roster: Vec<PlayerId>) -> Result<Self> {
        let name = name.into();
        if roster.len() != TEAM_SIZE {
            return Err(MatchError::InvalidTeamSize { team: name, expected: TEAM_SIZE, found: roster.len() });
        }
        if has_duplicates(&roster) {
            return Err(MatchError::InvalidRoster(format!("{} lists a player twice", name)));
        }
        Ok(Self {
            id,
            name,
            color,
            default_starting_roster_ids: roster.clone(),
            roster,
            is_left: false,
            can_substitute: false,
        })
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> TeamColor {
        self.color
    }

    pub fn painted_name(&self) -> String {
        self.color.paint(&self.name)
    }

    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    pub fn lineup(&self) -> &[PlayerId] {
        &self.roster[..LINEUP_SIZE.min(self.roster.len())]
    }

    pub fn bench(&self) -> &[PlayerId] {
        &self.roster[LINEUP_SIZE.min(self.roster.len())..]
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.roster.contains(&player)
    }

    pub fn default_starting_roster_ids(&self) -> &[PlayerId] {
        &self.default_starting_roster_ids
    }

    pub fn is_left(&self) -> bool {
        self.is_left
    }

    pub(crate) fn set_side(&mut self, is_left: bool) {
        self.is_left = is_left;
    }

    pub fn can_substitute(&self) -> bool {
        self.can_substitute
    }

    pub fn allow_substitution(&mut self) {
        self.can_substitute = true;
    }

    pub fn inhibit_substitution(&mut self) {
        self.can_substitute = false;
    }

    // ========== Roster order ==========

    /// Rebuilds the roster order from the default starting order.
    pub fn reset_roster(&mut self) {
        self.roster = self.default_starting_roster_ids.clone();
    }

    /// Replaces the default starting order. `ids` must be a permutation of
    /// the current roster.
    pub fn set_default_roster(&mut self, ids: Vec<PlayerId>) -> Result<()> {
        if ids.len() != self.roster.len() {
            return Err(MatchError::InvalidTeamSize {
                team: self.name.clone(),
                expected: self.roster.len(),
                found: ids.len(),
            });
        }
        if has_duplicates(&ids) {
            return Err(MatchError::InvalidRoster(format!("{} default order lists a player twice", self.name)));
        }
        if let Some(&stranger) = ids.iter().find(|id| !self.contains(**id)) {
            return Err(self.not_on_roster(stranger));
        }
        self.default_starting_roster_ids = ids;
        Ok(())
    }

    pub fn update_default_roster_to_current(&mut self) {
        self.default_starting_roster_ids = self.roster.clone();
    }

    /// Swaps the roster slots of two players.
    pub fn substitute(&mut self, first: PlayerId, second: PlayerId) -> Result<()> {
        if first == second {
            return Err(MatchError::SamePlayer(first));
        }
        let a = self.slot_of(first)?;
        let b = self.slot_of(second)?;
        self.roster.swap(a, b);
        Ok(())
    }

    /// Uniformly random lineup player out, uniformly random bench player in.
    pub fn decide_substitution<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Substitution> {
        let lineup = self.lineup();
        let bench = self.bench();
        if lineup.is_empty() || bench.is_empty() {
            return None;
        }
        let out = lineup[rng.gen_range(0..lineup.len())];
        let into = bench[rng.gen_range(0..bench.len())];
        Some(Substitution { out, into })
    }

    /// Applies a substitution and closes the gate.
    pub fn apply_substitution(&mut self, substitution: Substitution) -> Result<()> {
        if !self.lineup().contains(&substitution.out) {
            return Err(MatchError::InvalidRoster(format!(
                "{} is not in the {} lineup",
                substitution.out, self.name
            )));
        }
        if self.lineup().contains(&substitution.into) {
            return Err(MatchError::InvalidRoster(format!(
                "{} is already in the {} lineup",
                substitution.into, self.name
            )));
        }
        self.substitute(substitution.out, substitution.into)?;
        self.inhibit_substitution();
        log::debug!("{}: {} on for {}", self.name, substitution.into, substitution.out);
        Ok(())
    }

    fn slot_of(&self, player: PlayerId) -> Result<usize> {
        self.roster
            .iter()
            .position(|&id| id == player)
            .ok_or_else(|| self.not_on_roster(player))
    }

    fn not_on_roster(&self, player: PlayerId) -> MatchError {
        MatchError::NotOnRoster { player: player.to_string(), team: self.name.clone() }
    }

    // ========== Field operations ==========

    /// Assigns lineup slots and starting cells; sends the bench off the field.
    pub fn reset_all_positions(&self, players: &mut PlayerPool) -> Result<()> {
        for (slot, &id) in self.roster.iter().enumerate() {
            let player = players.get_mut(id)?;
            if slot < LINEUP_SIZE {
                player.assign_position(slot);
                player.reset_position(self.is_left)?;
            } else {
                player.leave_field();
            }
        }
        Ok(())
    }

    pub fn add_set_to_players_count(&self, players: &mut PlayerPool) -> Result<()> {
        for &id in self.lineup() {
            players.get_mut(id)?.credit_set_played();
        }
        Ok(())
    }

    pub fn advance_all<R: Rng + ?Sized>(&self, players: &mut PlayerPool, rng: &mut R) -> Result<()> {
        for &id in self.lineup() {
            players.get_mut(id)?.advance(self.is_left, rng)?;
        }
        Ok(())
    }

    /// `(row, column)` of every lineup player, in slot order.
    pub fn positions(&self, players: &PlayerPool) -> Result<Vec<(i32, i32)>> {
        self.lineup()
            .iter()
            .map(|&id| {
                let player = players.get(id)?;
                let (row, column) = player.cell()?;
                if !(field::LEFT_BOUNDARY..=field::RIGHT_BOUNDARY).contains(&column) {
                    return Err(MatchError::OutOfBounds { player: player.name().to_string(), row, column });
                }
                Ok((row, column))
            })
            .collect()
    }

    /// Detaches every roster player from the field.
    pub fn clear_field(&self, players: &mut PlayerPool) -> Result<()> {
        for &id in &self.roster {
            players.get_mut(id)?.leave_field();
        }
        Ok(())
    }
}

fn has_duplicates(ids: &[PlayerId]) -> bool {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).any(|w| w[0] == w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::uniform_registry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reset_all_positions_assigns_rows_and_columns() {
        let (mut registry, left, right) = uniform_registry(65);
        registry.team_mut(left).unwrap().set_side(true);

        for (team_id, is_left) in [(left, true), (right, false)] {
            let (team, players) = registry.team_and_players_mut(team_id).unwrap();
            team.reset_all_positions(players).unwrap();
            for (slot, &id) in team.lineup().iter().enumerate() {
                let p = players.get(id).unwrap();
                let expected_row = slot as i32 * 2 + if is_left { 0 } else { 1 };
                let expected_col = if is_left { 1 } else { 20 };
                assert_eq!(p.cell().unwrap(), (expected_row, expected_col));
            }
            for &id in team.bench() {
                assert!(!players.get(id).unwrap().on_field());
            }
        }
    }

    #[test]
    fn test_substitute_swaps_slots() {
        let (mut registry, left, right) = uniform_registry(65);
        let outsider = registry.team(right).unwrap().roster()[0];
        let team = registry.team_mut(left).unwrap();
        let starter = team.roster()[1];
        let reserve = team.roster()[6];

        team.substitute(starter, reserve).unwrap();
        assert_eq!(team.roster()[1], reserve);
        assert_eq!(team.roster()[6], starter);

        let err = team.substitute(starter, outsider).unwrap_err();
        assert!(matches!(err, MatchError::NotOnRoster { .. }));
        assert!(err.is_invariant_violation());

        team.reset_roster();
        assert_eq!(team.roster()[1], starter);
    }

    #[test]
    fn test_decide_substitution_closes_gate() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let (mut registry, left, _) = uniform_registry(65);
        let team = registry.team_mut(left).unwrap();
        team.allow_substitution();

        let sub = team.decide_substitution(&mut rng).unwrap();
        assert!(team.lineup().contains(&sub.out));
        assert!(team.bench().contains(&sub.into));

        team.apply_substitution(sub).unwrap();
        assert!(team.lineup().contains(&sub.into));
        assert!(team.bench().contains(&sub.out));
        assert!(!team.can_substitute());
    }

    #[test]
    fn test_set_default_roster_validates_membership() {
        let (mut registry, left, right) = uniform_registry(65);
        let outsider = registry.team(right).unwrap().roster()[0];
        let team = registry.team_mut(left).unwrap();

        let mut order: Vec<PlayerId> = team.roster().to_vec();
        order.reverse();
        team.set_default_roster(order.clone()).unwrap();
        team.reset_roster();
        assert_eq!(team.roster(), order.as_slice());

        let mut bad = order.clone();
        bad[0] = outsider;
        assert!(matches!(team.set_default_roster(bad), Err(MatchError::NotOnRoster { .. })));

        let mut twice = order;
        twice[1] = twice[0];
        assert!(matches!(team.set_default_roster(twice), Err(MatchError::InvalidRoster(_))));
    }

    #[test]
    fn test_add_set_credits_lineup_only() {
        let (mut registry, left, _) = uniform_registry(65);
        let (team, players) = registry.team_and_players_mut(left).unwrap();
        team.add_set_to_players_count(players).unwrap();
        for &id in team.lineup() {
            assert_eq!(players.get(id).unwrap().current_match_stat(crate::player::Stat::SetsPlayed), 1);
        }
        for &id in team.bench() {
            assert_eq!(players.get(id).unwrap().current_match_stat(crate::player::Stat::SetsPlayed), 0);
        }
    }

    #[test]
    fn test_new_rejects_wrong_size() {
        let ids: Vec<PlayerId> = (0..5).map(PlayerId).collect();
        let err = Team::new(TeamId(0), "Short", TeamColor::Red, ids).unwrap_err();
        assert!(matches!(err, MatchError::InvalidTeamSize { expected: 8, found: 5, .. }));
    }
}
