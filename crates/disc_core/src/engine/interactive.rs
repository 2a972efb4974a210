//! Human-driven decisions: "coach" and "star player" modes.

use rand::RngCore;

use super::constants::LINEUP_SIZE;
use super::controller::{MatchController, PlayChoice};
use super::selection;
use crate::error::Result;
use crate::models::{PlayerId, PlayerPool, Substitution, Team, TeamId};

/// Source of numeric menu answers.
///
/// `choose` blocks until one of `options` is given; re-prompting on invalid
/// answers is the implementation's job. A closed input is
/// [`MatchError::InputClosed`](crate::error::MatchError::InputClosed).
pub trait HumanInput {
    fn choose(&mut self, prompt: &str, options: &[usize]) -> Result<usize>;

    /// Informational line shown to the human. Ignored by default.
    fn notify(&mut self, _message: &str) {}
}

/// Routes lineup and substitution calls for `managed_team` (coach mode) and
/// shot/dash-or-pass calls for `star_player` (star mode) to a human.
/// Everything else stays autonomous.
pub struct InteractiveController<I: HumanInput> {
    managed_team: Option<TeamId>,
    star_player: Option<PlayerId>,
    input: I,
}

impl<I: HumanInput> InteractiveController<I> {
    pub fn new(managed_team: Option<TeamId>, star_player: Option<PlayerId>, input: I) -> Self {
        Self { managed_team, star_player, input }
    }

    pub fn coach(team: TeamId, input: I) -> Self {
        Self::new(Some(team), None, input)
    }

    pub fn star(player: PlayerId, input: I) -> Self {
        Self::new(None, Some(player), input)
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn into_input(self) -> I {
        self.input
    }

    /// Asks until the answer is one of `options`; only a closed input ends
    /// the question early.
    fn ask(&mut self, prompt: &str, options: &[usize]) -> Result<usize> {
        loop {
            let answer = self.input.choose(prompt, options)?;
            if options.contains(&answer) {
                return Ok(answer);
            }
            log::debug!("rejected selection {} for {:?}", answer, prompt);
            self.input.notify(&format!("{} is not one of {:?}", answer, options));
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.ask(prompt, &[0, 1])? == 1)
    }

    fn describe_roster(&mut self, team: &Team, players: &PlayerPool) -> Result<()> {
        self.input.notify(&team.painted_name());
        for (slot, &id) in team.roster().iter().enumerate() {
            let player = players.get(id)?;
            let a = player.attributes();
            self.input.notify(&format!(
                "{:>2} [{}] {:<10} spd {:>3} agi {:>3} cre {:>3} sho {:>3} sta {:>3} dis {:>3} con {:>3} stm {:>3} val {:>3}",
                slot,
                id.0,
                player.name(),
                a.speed,
                a.agility,
                a.creating,
                a.shooting,
                a.stability,
                a.distribution,
                a.control,
                a.stamina,
                a.value()
            ));
        }
        Ok(())
    }
}

impl<I: HumanInput> MatchController for InteractiveController<I> {
    fn manages(&self, team: TeamId) -> bool {
        self.managed_team == Some(team)
    }

    fn choose_lineup(&mut self, team: &Team, players: &PlayerPool) -> Result<Option<Vec<PlayerId>>> {
        if !self.manages(team.id()) {
            return Ok(None);
        }
        self.describe_roster(team, players)?;
        if !self.confirm("would you like to change the lineup? 1 for yes, 0 for no")? {
            return Ok(None);
        }

        let mut remaining: Vec<PlayerId> = team.default_starting_roster_ids().to_vec();
        let mut order = Vec::with_capacity(remaining.len());
        for slot in 0..LINEUP_SIZE {
            let options: Vec<usize> = remaining.iter().map(|id| id.index()).collect();
            let chosen = self.ask(&format!("choose the player id for position {}", slot), &options)?;
            remaining.retain(|id| id.index() != chosen);
            order.push(PlayerId(chosen as u32));
        }
        order.extend(remaining);
        Ok(Some(order))
    }

    fn choose_substitution(
        &mut self,
        team: &Team,
        players: &PlayerPool,
        rng: &mut dyn RngCore,
    ) -> Result<Option<Substitution>> {
        if !self.manages(team.id()) {
            return Ok(team.decide_substitution(rng));
        }
        if !self.confirm("would you like to make a substitution? 1 for yes, 0 for no")? {
            return Ok(None);
        }
        self.describe_roster(team, players)?;
        let lineup_slots: Vec<usize> = (0..team.lineup().len()).collect();
        let bench_slots: Vec<usize> = (team.lineup().len()..team.roster().len()).collect();
        let out = self.ask("choose the slot to sub out", &lineup_slots)?;
        let into = self.ask("choose the slot to sub in", &bench_slots)?;
        Ok(Some(Substitution { out: team.roster()[out], into: team.roster()[into] }))
    }

    fn choose_shot_target(
        &mut self,
        shooter: PlayerId,
        targets: &[PlayerId],
        players: &PlayerPool,
        rng: &mut dyn RngCore,
    ) -> Result<PlayerId> {
        if self.star_player != Some(shooter) {
            return selection::choose_target(players, shooter, targets, rng);
        }
        for (slot, &id) in targets.iter().enumerate() {
            let target = players.get(id)?;
            let (row, column) = target.cell()?;
            let marker = if target.has_disc() { " (carrier)" } else { "" };
            self.input.notify(&format!("{}: {} at row {}, column {}{}", slot, target.name(), row, column, marker));
        }
        let options: Vec<usize> = (0..targets.len()).collect();
        let slot = self.ask("choose which player to shoot", &options)?;
        Ok(targets[slot])
    }

    fn choose_dash_or_pass(
        &mut self,
        carrier: PlayerId,
        team: &Team,
        players: &PlayerPool,
        rng: &mut dyn RngCore,
    ) -> Result<PlayChoice> {
        if self.star_player != Some(carrier) {
            return selection::decide_dash_or_pass(players, carrier, team.lineup(), team.is_left(), rng);
        }
        self.input.notify("you created the disc!");
        if self.ask("0 to dash, 1 to pass", &[0, 1])? == 0 {
            return Ok(PlayChoice::Dash);
        }
        let lineup = team.lineup();
        let options: Vec<usize> = (0..lineup.len()).filter(|&slot| lineup[slot] != carrier).collect();
        let slot = self.ask("choose a teammate slot to pass to", &options)?;
        Ok(PlayChoice::Pass(lineup[slot]))
    }
}
