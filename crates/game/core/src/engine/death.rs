//! Death resolution.
//!
//! Runs after the status tick: every actor marked for death either spends a
//! one-use resurrection effect or dies for good. Final deaths reveal the
//! fallen actor's hidden role.

use super::log::{LogKind, RoundLog};
use crate::state::{DeathCause, GameState};
use crate::status::StatusKind;

/// Resolves every pending death in roster order.
pub fn resolve_deaths(state: &mut GameState, log: &mut RoundLog) {
    for idx in 0..state.actors.len() {
        let pending = {
            let actor = &state.actors[idx];
            if actor.alive { actor.pending_death } else { None }
        };
        let Some(cause) = pending else {
            continue;
        };

        // Resurrection intervenes before the death is final. The effect is
        // consumed on use, so a later lethal hit sticks.
        if state.actors[idx].effects.has(StatusKind::Undying) {
            let actor = &mut state.actors[idx];
            actor.effects.remove_kind(StatusKind::Undying);
            actor.hp = 1;
            actor.pending_death = None;
            let name = actor.name.clone();
            let id = actor.id;
            log.event(
                LogKind::Resurrection,
                format!("{name} refuses the grave and staggers up at 1 hp"),
                None,
                Some(id),
            );
            continue;
        }

        let killer = match cause {
            DeathCause::Poison(src) | DeathCause::Player(src) => {
                state.actor(src).map(|a| a.name.clone())
            }
            DeathCause::Monster => None,
        };

        let actor = &mut state.actors[idx];
        let name = actor.name.clone();
        let id = actor.id;
        let saboteur = actor.saboteur;
        actor.die();

        let message = match (cause, killer) {
            (DeathCause::Monster, _) => format!("{name} is slain by the monster"),
            (DeathCause::Poison(_), Some(killer)) => {
                format!("{name} succumbs to {killer}'s venom")
            }
            (DeathCause::Poison(_), None) => format!("{name} succumbs to venom"),
            (DeathCause::Player(_), Some(killer)) => {
                format!("{name} is struck down by {killer}")
            }
            (DeathCause::Player(_), None) => format!("{name} is struck down"),
        };
        log.event(LogKind::Death, message, None, Some(id));

        let reveal = if saboteur {
            format!("{name} was a saboteur all along")
        } else {
            format!("{name} was loyal to the party")
        };
        log.event(LogKind::Reveal, reveal, None, Some(id));
    }
}
