//! End-of-round status tick.
//!
//! One pass over every entity: over-time effects fire, durations decrement,
//! expired effects are dropped. Lethal poison marks its victim for death
//! resolution rather than killing outright, and a regeneration tick from a
//! hidden-role healer risks revealing them.

use super::StatusKind;
use crate::engine::{LogKind, RoundLog};
use crate::env::{BalanceParams, RngOracle, seed_ctx};
use crate::state::{ActorId, DeathCause, GameState, RoundFlags};

/// Accumulated over-time amounts for one entity, attributed to the first
/// source that applied each effect.
#[derive(Default)]
struct OverTime {
    poison: i32,
    poison_source: Option<ActorId>,
    regen: i32,
    regen_source: Option<ActorId>,
}

fn gather(effects: &super::StatusEffects) -> OverTime {
    let mut over = OverTime::default();
    for effect in effects.iter() {
        match effect.kind {
            StatusKind::Poisoned => {
                over.poison += effect.magnitude;
                over.poison_source.get_or_insert(effect.source);
            }
            StatusKind::Regenerating => {
                over.regen += effect.magnitude;
                over.regen_source.get_or_insert(effect.source);
            }
            _ => {}
        }
    }
    over
}

/// Decrements finite durations and drains expired effects.
fn age_effects(effects: &mut super::StatusEffects) -> Vec<super::StatusEffect> {
    for effect in effects.iter_mut() {
        if effect.turns > 0 {
            effect.turns -= 1;
        }
    }
    effects.drain_expired()
}

/// Runs the end-of-round tick over the whole room.
pub fn tick(
    state: &mut GameState,
    balance: &BalanceParams,
    rng: &dyn RngOracle,
    log: &mut RoundLog,
) {
    // Healers whose regeneration landed this tick; checked for detection
    // after the per-entity pass so the borrow of each actor is released.
    let mut active_healers: Vec<ActorId> = Vec::new();

    for idx in 0..state.actors.len() {
        let actor = &mut state.actors[idx];
        if !actor.alive {
            continue;
        }
        let id = actor.id;
        let name = actor.name.clone();

        let over = gather(&actor.effects);
        if over.poison > 0 {
            let source = over.poison_source.unwrap_or(id);
            let applied = actor.apply_damage(over.poison as u32, DeathCause::Poison(source));
            if applied > 0 {
                log.event(
                    LogKind::Damage,
                    format!("{name} suffers {applied} poison damage"),
                    None,
                    Some(id),
                );
            }
        }
        if over.regen > 0 {
            let applied = actor.heal(over.regen as u32);
            if applied > 0 {
                log.event(
                    LogKind::Healing,
                    format!("{name} regenerates {applied} hp"),
                    over.regen_source,
                    Some(id),
                );
                if let Some(healer) = over.regen_source {
                    active_healers.push(healer);
                }
            }
        }

        for expired in age_effects(&mut actor.effects) {
            // A stun running out must not leave a stale submission behind.
            if expired.kind == StatusKind::Stunned {
                actor.flags = RoundFlags::empty();
            }
            log.event(
                LogKind::Status,
                format!("{name}'s {} wears off", expired.kind),
                None,
                Some(id),
            );
        }
    }

    // The monster ticks like everyone else.
    {
        let monster = &mut state.monster;
        if monster.is_alive() {
            let over = gather(&monster.effects);
            if over.poison > 0 {
                let applied = monster.apply_damage(over.poison as u32);
                if applied > 0 {
                    log.public(
                        LogKind::Damage,
                        format!("The monster suffers {applied} poison damage"),
                    );
                }
            }
            if over.regen > 0 {
                let applied = monster.heal(over.regen as u32);
                if applied > 0 {
                    log.public(
                        LogKind::Healing,
                        format!("The monster regenerates {applied} hp"),
                    );
                    if let Some(healer) = over.regen_source {
                        active_healers.push(healer);
                    }
                }
            }
        }
        for expired in age_effects(&mut monster.effects) {
            log.public(
                LogKind::Status,
                format!("The monster's {} wears off", expired.kind),
            );
        }
    }

    // Detection rolls for hidden-role healers, one per landed regeneration.
    for healer_id in active_healers {
        let seed = state.roll_seed(healer_id.0, seed_ctx::DETECTION);
        state.bump_nonce();
        if let Some(healer) = state.actor_mut(healer_id)
            && healer.saboteur
            && !healer.revealed
            && rng.percent_check(seed, balance.detection_probability)
        {
            healer.revealed = true;
            let name = healer.name.clone();
            log.event(
                LogKind::Reveal,
                format!("{name}'s mending is laced with shadow: a saboteur stands revealed!"),
                Some(healer_id),
                None,
            );
        }
    }
}
