//! Match simulation: Match -> Set -> Phase -> Turn.
//!
//! [`Game`] borrows the [`Registry`] for the duration of one match and owns
//! the random source, so a seeded rng replays the same match. Decisions are
//! delegated to a [`MatchController`]; events and per-turn snapshots go to an
//! optional [`MatchObserver`].

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::config::MatchConfig;
use super::constants::field;
use super::controller::{AutonomousController, MatchController, PlayChoice};
use super::events::{MatchEvent, MatchObserver, MatchSnapshot};
use super::field_board::FieldBoard;
use super::result::{self, MatchResult};
use super::selection;
use crate::error::{MatchError, Result};
use crate::models::{PlayerId, Registry, TeamId};
use crate::player::Player;

/// How a run of turns ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The carrier reached the scoring strip; the set is over.
    Touchdown,
    /// The carrier was taken down.
    Drop,
    /// Turn limit reached; the disc is free again.
    Time,
}

pub struct Game<'a, R: RngCore> {
    registry: &'a mut Registry,
    left: TeamId,
    right: TeamId,
    config: MatchConfig,
    rng: R,
    controller: Box<dyn MatchController + 'a>,
    observer: Option<&'a mut dyn MatchObserver>,

    left_score: u8,
    right_score: u8,
    set_counter: u32,
    phase_counter: u32,
    turn_counter: u32,
    phases_played: u32,
    turns_played: u32,

    carrier: Option<PlayerId>,
    last_passer: Option<PlayerId>,
    events: Vec<MatchEvent>,
}

impl<'a, R: RngCore> Game<'a, R> {
    pub fn new(registry: &'a mut Registry, left: TeamId, right: TeamId, config: MatchConfig, rng: R) -> Result<Self> {
        config.validate()?;
        registry.team(left)?;
        registry.team(right)?;
        if left == right {
            return Err(MatchError::InvalidRoster(format!("{} cannot play itself", left)));
        }
        Ok(Self {
            registry,
            left,
            right,
            config,
            rng,
            controller: Box::new(AutonomousController),
            observer: None,
            left_score: 0,
            right_score: 0,
            set_counter: 0,
            phase_counter: 0,
            turn_counter: 0,
            phases_played: 0,
            turns_played: 0,
            carrier: None,
            last_passer: None,
            events: Vec::new(),
        })
    }

    pub fn with_controller(mut self, controller: Box<dyn MatchController + 'a>) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_observer(mut self, observer: &'a mut dyn MatchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn scores(&self) -> (u8, u8) {
        (self.left_score, self.right_score)
    }

    /// `(set, phase, turn)` counters.
    pub fn counters(&self) -> (u32, u32, u32) {
        (self.set_counter, self.phase_counter, self.turn_counter)
    }

    pub fn carrier(&self) -> Option<PlayerId> {
        self.carrier
    }

    pub fn registry(&self) -> &Registry {
        &*self.registry
    }

    /// Plays a whole match and reports the result.
    pub fn simulate(&mut self) -> Result<MatchResult> {
        self.prepare_match()?;
        let target = self.config.points_for_win;
        while self.left_score < target && self.right_score < target {
            self.play_set()?;
        }
        self.conclude()
    }

    // ========== Match ==========

    fn prepare_match(&mut self) -> Result<()> {
        self.left_score = 0;
        self.right_score = 0;
        self.set_counter = 0;
        self.phase_counter = 0;
        self.turn_counter = 0;
        self.phases_played = 0;
        self.turns_played = 0;
        self.carrier = None;
        self.last_passer = None;
        self.events.clear();

        for (team_id, is_left) in [(self.left, true), (self.right, false)] {
            let (team, players) = self.registry.team_and_players_mut(team_id)?;
            team.set_side(is_left);
            for &id in team.roster() {
                players.get_mut(id)?.reset_match_stats();
            }
            if let Some(order) = self.controller.choose_lineup(team, players)? {
                team.set_default_roster(order)?;
                log::debug!("{} lineup changed", team.name());
            }
            team.reset_roster();
            team.reset_all_positions(players)?;
            team.inhibit_substitution();
        }

        log::info!(
            "{} vs {}",
            self.registry.team(self.left)?.name(),
            self.registry.team(self.right)?.name()
        );
        Ok(())
    }

    fn conclude(&mut self) -> Result<MatchResult> {
        let winner = if self.left_score >= self.config.points_for_win { self.left } else { self.right };

        let mut roster = self.registry.team(self.left)?.roster().to_vec();
        roster.extend_from_slice(self.registry.team(self.right)?.roster());
        let players = self.registry.players();
        let top_performers = result::top_performers(players, &roster)?;
        let ratings = result::ratings(players, &roster)?;

        for team_id in [self.left, self.right] {
            let (team, players) = self.registry.team_and_players_mut(team_id)?;
            team.inhibit_substitution();
            team.reset_roster();
            team.clear_field(players)?;
        }
        self.registry.team_mut(self.left)?.set_side(false);
        self.carrier = None;

        let left = self.registry.team(self.left)?;
        let right = self.registry.team(self.right)?;
        let result = MatchResult {
            left_team: self.left,
            right_team: self.right,
            left_name: left.name().to_string(),
            right_name: right.name().to_string(),
            left_score: self.left_score,
            right_score: self.right_score,
            winner,
            sets_played: self.set_counter,
            phases_played: self.phases_played,
            turns_played: self.turns_played,
            events: std::mem::take(&mut self.events),
            top_performers,
            ratings,
        };
        log::info!(
            "{} won! final score {} : {}",
            result.winner_name(),
            result.left_score,
            result.right_score
        );
        Ok(result)
    }

    // ========== Set ==========

    fn play_set(&mut self) -> Result<()> {
        self.set_counter += 1;
        self.phase_counter = 0;
        self.turn_counter = 0;
        self.carrier = None;
        log::info!("set {} ({} : {})", self.set_counter, self.left_score, self.right_score);
        self.emit(MatchEvent::SetStarted {
            set: self.set_counter,
            left_score: self.left_score,
            right_score: self.right_score,
        });

        let combined = self.left_score + self.right_score;
        for team_id in [self.left, self.right] {
            let managed = self.controller.manages(team_id);
            let (team, players) = self.registry.team_and_players_mut(team_id)?;
            if self.config.substitution.opens(combined, managed) {
                team.allow_substitution();
            }
            let mut applied = None;
            if team.can_substitute() {
                if let Some(substitution) = self.controller.choose_substitution(team, players, &mut self.rng)? {
                    team.apply_substitution(substitution)?;
                    applied = Some(substitution);
                }
                team.inhibit_substitution();
            }
            team.reset_all_positions(players)?;
            team.add_set_to_players_count(players)?;

            if let Some(s) = applied {
                self.emit(MatchEvent::Substitution { team: team_id, out: s.out, into: s.into });
            }
        }

        self.play_phases()
    }

    // ========== Phase ==========

    fn play_phases(&mut self) -> Result<()> {
        loop {
            self.phase_counter += 1;
            self.phases_played += 1;
            self.turn_counter = 0;
            self.last_passer = None;
            log::debug!("set {} phase {}", self.set_counter, self.phase_counter);

            let running = self.creation_contest()?;
            if !self.dash_or_pass(running)? {
                continue;
            }
            match self.play_turns(running)? {
                TurnOutcome::Touchdown => return Ok(()),
                TurnOutcome::Drop | TurnOutcome::Time => continue,
            }
        }
    }

    /// Picks a carrier among the on-field players off the boundary columns,
    /// weighted by `creating`. Returns the running team.
    fn creation_contest(&mut self) -> Result<TeamId> {
        let mut lineups = self.registry.team(self.left)?.lineup().to_vec();
        lineups.extend_from_slice(self.registry.team(self.right)?.lineup());

        let players = self.registry.players_mut();
        for &id in &lineups {
            players.get_mut(id)?.give_disc_away();
        }
        let candidates = selection::creation_candidates(players, lineups.iter().copied())?;
        let carrier = selection::pick_creator(players, &candidates, &mut self.rng)?;
        players.get_mut(carrier)?.create_disc();
        self.carrier = Some(carrier);

        let running = self.running_team_of(carrier)?;
        log::debug!("{} created the disc", self.registry.player(carrier)?.name());
        self.emit(MatchEvent::Possession {
            set: self.set_counter,
            phase: self.phase_counter,
            carrier,
            team: running,
        });
        Ok(running)
    }

    fn running_team_of(&self, carrier: PlayerId) -> Result<TeamId> {
        if self.registry.team(self.left)?.contains(carrier) {
            Ok(self.left)
        } else if self.registry.team(self.right)?.contains(carrier) {
            Ok(self.right)
        } else {
            let player = self.registry.player(carrier)?.name().to_string();
            log::error!("carrier {} is on neither roster", player);
            Err(MatchError::CarrierNotOnRoster { player })
        }
    }

    /// Returns false when a pass failed and the phase has to restart.
    fn dash_or_pass(&mut self, running: TeamId) -> Result<bool> {
        let carrier = self.carrier.ok_or(MatchError::NoCarrier { context: "deciding dash or pass" })?;
        let team = self.registry.team(running)?;
        let is_left = team.is_left();
        let choice = self.controller.choose_dash_or_pass(carrier, team, self.registry.players(), &mut self.rng)?;

        match choice {
            PlayChoice::Dash => {
                self.registry.players_mut().get_mut(carrier)?.dash();
                self.emit(MatchEvent::Dash { carrier });
                Ok(true)
            }
            PlayChoice::Pass(catcher) => {
                let team = self.registry.team(running)?;
                if !team.lineup().contains(&catcher) {
                    return Err(MatchError::NotOnRoster { player: catcher.to_string(), team: team.name().to_string() });
                }
                let (passer, receiver) = self.registry.players_mut().pair_mut(carrier, catcher)?;
                let completed = Player::pass_play(passer, receiver, is_left, &mut self.rng)?;
                if completed {
                    self.carrier = Some(catcher);
                    self.last_passer = Some(carrier);
                } else {
                    self.carrier = None;
                }
                self.emit(MatchEvent::Pass { passer: carrier, catcher, completed });
                Ok(completed)
            }
        }
    }

    // ========== Turn ==========

    fn play_turns(&mut self, running: TeamId) -> Result<TurnOutcome> {
        let shooting = if running == self.left { self.right } else { self.left };
        let shooters = self.registry.team(shooting)?.lineup().to_vec();
        let targets = self.registry.team(running)?.lineup().to_vec();
        let target_is_left = self.registry.team(running)?.is_left();
        self.turn_counter = 0;

        loop {
            self.turn_counter += 1;
            self.turns_played += 1;
            let carrier = self.carrier.ok_or(MatchError::NoCarrier { context: "playing a turn" })?;

            for team_id in [self.left, self.right] {
                let (team, players) = self.registry.team_and_players_mut(team_id)?;
                team.advance_all(players, &mut self.rng)?;
            }

            let mut taker = None;
            for &shooter in &shooters {
                let target =
                    self.controller.choose_shot_target(shooter, &targets, self.registry.players(), &mut self.rng)?;
                if !targets.contains(&target) {
                    return Err(MatchError::NotOnRoster {
                        player: target.to_string(),
                        team: self.registry.team(running)?.name().to_string(),
                    });
                }
                let (shooter_player, target_player) = self.registry.players_mut().pair_mut(shooter, target)?;
                let fell = Player::face_off(shooter_player, target_player, target_is_left, &mut self.rng)?;
                // Later shots at the fallen carrier no longer take the disc.
                if fell && target == carrier && taker.is_none() {
                    taker = Some(shooter);
                }
            }

            let outcome = self.resolve_turn(running, carrier, taker)?;
            self.notify_turn()?;
            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }
    }

    fn resolve_turn(&mut self, running: TeamId, carrier: PlayerId, taker: Option<PlayerId>) -> Result<Option<TurnOutcome>> {
        if let Some(by) = taker {
            self.carrier = None;
            log::debug!(
                "{} took {} down",
                self.registry.player(by)?.name(),
                self.registry.player(carrier)?.name()
            );
            self.emit(MatchEvent::CarrierDown { carrier, by, turn: self.turn_counter });
            return Ok(Some(TurnOutcome::Drop));
        }

        let (_, column) = self.registry.player(carrier)?.cell()?;
        if field::in_scoring_strip(column) {
            self.score_touchdown(running, carrier)?;
            return Ok(Some(TurnOutcome::Touchdown));
        }

        if self.turn_counter >= self.config.max_turns_per_phase {
            self.registry.players_mut().get_mut(carrier)?.give_disc_away();
            self.carrier = None;
            log::debug!("time! the disc is free");
            self.emit(MatchEvent::Time { carrier });
            return Ok(Some(TurnOutcome::Time));
        }
        Ok(None)
    }

    fn score_touchdown(&mut self, running: TeamId, carrier: PlayerId) -> Result<()> {
        let players = self.registry.players_mut();
        players.get_mut(carrier)?.touchdown();
        let assist = self.last_passer.filter(|&passer| passer != carrier);
        if let Some(passer) = assist {
            players.get_mut(passer)?.credit_assist();
        }
        if running == self.left {
            self.left_score += 1;
        } else {
            self.right_score += 1;
        }
        log::info!(
            "{} scored a touchdown! {} : {}",
            self.registry.player(carrier)?.name(),
            self.left_score,
            self.right_score
        );
        self.emit(MatchEvent::Touchdown {
            scorer: carrier,
            assist,
            team: running,
            turn: self.turn_counter,
            left_score: self.left_score,
            right_score: self.right_score,
        });
        Ok(())
    }

    // ========== Observation ==========

    /// Captures the board (which checks every column is on the field) and
    /// hands the snapshot to the observer.
    fn notify_turn(&mut self) -> Result<()> {
        let left = self.registry.team(self.left)?;
        let right = self.registry.team(self.right)?;
        let players = self.registry.players();
        let board = FieldBoard::capture(players, left, right, self.carrier)?;

        let mut holders = Vec::new();
        for &id in left.roster().iter().chain(right.roster()) {
            if players.get(id)?.has_disc() {
                holders.push(id);
            }
        }
        log::trace!("turn {}\n{}", self.turn_counter, board.render_plain());

        if let Some(observer) = self.observer.as_mut() {
            observer.on_turn(&MatchSnapshot {
                set: self.set_counter,
                phase: self.phase_counter,
                turn: self.turn_counter,
                left_score: self.left_score,
                right_score: self.right_score,
                carrier: self.carrier,
                holders,
                board,
            });
        }
        Ok(())
    }

    fn emit(&mut self, event: MatchEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
        self.events.push(event);
    }
}
