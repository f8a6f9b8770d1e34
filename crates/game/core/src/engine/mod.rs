//! Round resolution.
//!
//! The [`RoundResolver`] is the authoritative reducer for [`GameState`]: it
//! drives the strict phase order of one round and produces the round's log
//! and snapshots. A round always completes (per-action failures are caught
//! and logged); only a pre-round corruption check may abort it, with a
//! single error entry.

mod death;
mod log;
mod progression;

pub use log::{LogKind, RoundLog, RoundLogEntry};
pub use progression::ProgressionOutcome;

use core::mem;

use crate::ability::{DispatchRegistry, EffectContext, RacialRegistry};
use crate::action::{PendingAction, RacialAction};
use crate::combat::{self, CoordinationMap};
use crate::config::GameConfig;
use crate::env::{AbilityOracle, BalanceParams, RngOracle, SystemsEnv};
use crate::monster;
use crate::state::{ActorState, GameState, MonsterState, RoundFlags, Target};
use crate::status;

/// Final outcome of the room, if the round decided one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    /// The monster fell. Below the level cap the raid continues at the next
    /// level; at the cap this is the final victory.
    Party,
    /// Every non-saboteur is dead while the monster still stands.
    Saboteurs,
}

/// Everything a host needs to broadcast one resolved round.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundOutcome {
    pub round: u32,
    pub log: RoundLog,
    /// Post-round actor snapshots in roster order.
    pub actors: Vec<ActorState>,
    pub monster: MonsterState,
    pub level: u32,
    /// A level was awarded and the next encounter spawned.
    pub level_up: bool,
    pub winner: Option<Winner>,
}

/// Orchestrates one round end-to-end.
///
/// Phase order: start → racial → coordination analysis → actions → monster
/// → status tick → death resolution → progression → win check → cleanup.
pub struct RoundResolver<'a> {
    state: &'a mut GameState,
    config: &'a GameConfig,
    registry: &'a DispatchRegistry,
    racials: &'a RacialRegistry,
}

impl<'a> RoundResolver<'a> {
    pub fn new(
        state: &'a mut GameState,
        config: &'a GameConfig,
        registry: &'a DispatchRegistry,
        racials: &'a RacialRegistry,
    ) -> Self {
        Self {
            state,
            config,
            registry,
            racials,
        }
    }

    /// Resolves the current round and returns its log and snapshots.
    ///
    /// Never panics and never returns early on gameplay failures; a corrupt
    /// state or missing oracle aborts with one error entry, leaving the room
    /// usable if the corruption was transient.
    pub fn resolve(&mut self, env: &SystemsEnv<'_>) -> RoundOutcome {
        let round_number = self.state.round.number;
        let mut log = RoundLog::new();

        let (abilities, balance, rng) = match (env.abilities(), env.balance(), env.rng()) {
            (Ok(a), Ok(b), Ok(r)) => (a, b, r),
            _ => {
                log.public(
                    LogKind::Error,
                    "round aborted: required oracles are missing",
                );
                log.finalize();
                return self.outcome(round_number, log, false, None);
            }
        };

        if let Err(corruption) = self.state.validate() {
            log.public(
                LogKind::Error,
                format!("round aborted: state corruption detected ({corruption})"),
            );
            log.finalize();
            return self.outcome(round_number, log, false, None);
        }

        // ==== start ====
        self.state.round.accepting = false;
        log.public(LogKind::Round, format!("Round {round_number} begins"));
        let comeback_was = self.state.comeback_active;
        self.state.comeback_active = monster::comeback_active(self.state, &balance.comeback);
        if self.state.comeback_active && !comeback_was {
            log.public(
                LogKind::System,
                "Backed against the wall, the loyal fight harder",
            );
        }

        // ==== racial phase ====
        let racial_actions = mem::take(&mut self.state.round.racial);
        for action in racial_actions {
            self.resolve_racial(action, abilities, balance, rng, &mut log);
            self.state.bump_nonce();
        }

        // ==== coordination analysis ====
        // Fixed before any action executes; contributors who die mid-round
        // still count toward the bonus they queued into.
        let coordination = combat::analyze(&self.state.round.pending, &balance.coordination);

        // ==== action phase ====
        let mut pending = mem::take(&mut self.state.round.pending);
        pending.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.submission_index.cmp(&b.submission_index))
        });
        for action in &pending {
            self.resolve_action(action, &coordination, balance, rng, &mut log);
            self.state.bump_nonce();
        }

        // ==== monster action ====
        if self.state.monster.is_alive() {
            monster::act(self.state, balance, rng, &mut log);
        }

        // ==== status tick ====
        status::tick(self.state, balance, rng, &mut log);

        // ==== death resolution ====
        death::resolve_deaths(self.state, &mut log);

        // ==== progression ====
        let progression = progression::run(self.state, self.config, abilities, balance, &mut log);

        // ==== win check ====
        let winner = if progression.monster_defeated {
            Some(Winner::Party)
        } else if self.state.actors.iter().all(|a| a.saboteur || !a.alive) {
            Some(Winner::Saboteurs)
        } else {
            None
        };
        match winner {
            Some(Winner::Party) if progression.level_up => log.public(
                LogKind::Round,
                "Victory! The encounter is won, and a greater trial awaits",
            ),
            Some(Winner::Party) => log.public(
                LogKind::Round,
                "Victory! The monster is destroyed and the raid is complete",
            ),
            Some(Winner::Saboteurs) => log.public(
                LogKind::Round,
                "The last loyal heart stops. The saboteurs claim the room",
            ),
            None => {}
        }

        // ==== cleanup ====
        let game_over = matches!(winner, Some(Winner::Saboteurs))
            || (matches!(winner, Some(Winner::Party)) && !progression.level_up);
        for actor in &mut self.state.actors {
            actor.flags = RoundFlags::empty();
            actor.tick_cooldowns();
        }
        self.state.round.advance(!game_over);

        log.finalize();
        self.outcome(round_number, log, progression.level_up, winner)
    }

    fn outcome(
        &self,
        round: u32,
        log: RoundLog,
        level_up: bool,
        winner: Option<Winner>,
    ) -> RoundOutcome {
        RoundOutcome {
            round,
            log,
            actors: self.state.actors.clone(),
            monster: self.state.monster.clone(),
            level: self.state.level,
            level_up,
            winner,
        }
    }

    /// Resolves one queued racial action. Failures are logged, never fatal.
    fn resolve_racial(
        &mut self,
        action: RacialAction,
        abilities: &dyn AbilityOracle,
        balance: &BalanceParams,
        rng: &dyn RngOracle,
        log: &mut RoundLog,
    ) {
        let Some(actor) = self.state.actor(action.actor) else {
            return;
        };
        let actor_name = actor.name.clone();
        if !actor.alive {
            log.event(
                LogKind::Action,
                format!("{actor_name} lies still; their racial gift goes unused"),
                None,
                Some(action.actor),
            );
            return;
        }
        if actor.effects.prevents_action() {
            log.event(
                LogKind::Action,
                format!("{actor_name} is stunned; their racial gift goes unused"),
                None,
                Some(action.actor),
            );
            return;
        }

        // Spec and handler were both checked at submission; a miss here is a
        // catalog swap mid-game and is logged as an internal failure.
        let Some((name, params)) = abilities
            .racial_spec(action.race)
            .and_then(|r| r.action.map(|a| (r.name, a.params)))
        else {
            log.event(
                LogKind::Error,
                format!("{actor_name}'s racial gift is no longer in the catalog"),
                None,
                Some(action.actor),
            );
            return;
        };
        let Some(handler) = self.racials.handler(action.race) else {
            log.event(
                LogKind::Error,
                format!("{actor_name}'s racial gift has no handler"),
                None,
                Some(action.actor),
            );
            return;
        };

        let mut ctx = EffectContext {
            actor: action.actor,
            target: action.target,
            name,
            params,
            coordination: None,
            state: &mut *self.state,
            balance,
            rng,
            log: &mut *log,
        };
        match handler(&mut ctx) {
            Ok(()) => {
                if let Some(actor) = self.state.actor_mut(action.actor) {
                    actor.racial_uses += 1;
                }
            }
            Err(error) => {
                log.event(
                    LogKind::Error,
                    format!("{actor_name}'s {name} fizzles: {error}"),
                    Some(action.actor),
                    None,
                );
            }
        }
    }

    /// Resolves one queued class action with resolution-time re-validation.
    fn resolve_action(
        &mut self,
        action: &PendingAction,
        coordination: &CoordinationMap,
        balance: &BalanceParams,
        rng: &dyn RngOracle,
        log: &mut RoundLog,
    ) {
        let Some(actor) = self.state.actor(action.actor) else {
            return;
        };
        let actor_name = actor.name.clone();

        // Expected races between submission and resolution: skipped with a
        // log entry, never treated as errors.
        if !actor.alive {
            log.event(
                LogKind::Action,
                format!("{actor_name} fell before acting; {} is lost", action.kind),
                None,
                Some(action.actor),
            );
            return;
        }
        if actor.effects.prevents_action() {
            log.event(
                LogKind::Action,
                format!("{actor_name} is stunned and cannot use {}", action.kind),
                None,
                Some(action.actor),
            );
            return;
        }
        match action.target {
            Target::Player(target_id) => {
                if !self.state.actor(target_id).is_some_and(|a| a.alive) {
                    log.event(
                        LogKind::Action,
                        format!("{actor_name}'s {} finds its target already gone", action.kind),
                        Some(action.actor),
                        None,
                    );
                    return;
                }
            }
            Target::Monster => {
                if !self.state.monster.is_alive() {
                    log.event(
                        LogKind::Action,
                        format!("{actor_name}'s {} finds the monster already dead", action.kind),
                        Some(action.actor),
                        None,
                    );
                    return;
                }
            }
            Target::AllAllies => {}
        }

        let Some(handler) = self.registry.handler(action.kind) else {
            log.event(
                LogKind::Error,
                format!("no handler registered for {}", action.kind),
                Some(action.actor),
                None,
            );
            return;
        };

        let mut ctx = EffectContext {
            actor: action.actor,
            target: action.target,
            name: action.kind.as_ref(),
            params: action.spec.params,
            coordination: coordination.get(&action.target),
            state: &mut *self.state,
            balance,
            rng,
            log: &mut *log,
        };
        match handler(&mut ctx) {
            Ok(()) => {
                if let Some(actor) = self.state.actor_mut(action.actor) {
                    actor.start_cooldown(action.kind, action.spec.cooldown);
                }
            }
            Err(error) => {
                log.event(
                    LogKind::Error,
                    format!("{actor_name}'s {} fails: {error}", action.kind),
                    Some(action.actor),
                    None,
                );
            }
        }
    }
}
