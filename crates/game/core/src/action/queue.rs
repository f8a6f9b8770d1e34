//! Submission validation for class and racial actions.
//!
//! Submission only enqueues data: nothing here executes effects or writes to
//! the round log. Every rejection is returned synchronously to the caller.

use super::{PendingAction, RacialAction, SubmitError};
use crate::ability::{AbilityKind, DispatchRegistry, RacialRegistry, TargetShape};
use crate::env::{SystemsEnv, seed_ctx};
use crate::state::{ActorId, GameState, RoundFlags, Target};
use crate::status::StatusKind;

/// Validates and queues one class action for the current round.
///
/// At most one class action per living actor per round. Single-target
/// submissions aimed at a living, invisible player are silently redirected
/// to a uniformly random visible candidate (or the monster); the submitter
/// is not told a redirect happened.
///
/// # Errors
///
/// See [`SubmitError`]; all failures are synchronous and nothing is queued.
pub fn submit_action(
    state: &mut GameState,
    env: &SystemsEnv<'_>,
    registry: &DispatchRegistry,
    actor_id: ActorId,
    ability: AbilityKind,
    target: Target,
) -> Result<(), SubmitError> {
    if !state.round.accepting {
        return Err(SubmitError::RoundClosed);
    }

    let actor = state
        .actor(actor_id)
        .ok_or(SubmitError::UnknownActor(actor_id))?;
    if !actor.alive {
        return Err(SubmitError::ActorDead(actor_id));
    }
    if !actor.can_act() {
        return Err(SubmitError::Incapacitated(actor_id));
    }
    if actor.flags.contains(RoundFlags::SUBMITTED_ACTION) {
        return Err(SubmitError::AlreadySubmitted(actor_id));
    }

    let spec = env
        .abilities()?
        .ability_spec(ability)
        .ok_or(SubmitError::UnknownAbility(ability))?
        .clone();

    let slot = actor
        .slot(ability)
        .ok_or(SubmitError::NotUnlocked(ability))?;
    if !slot.ready() {
        return Err(SubmitError::OnCooldown(ability));
    }

    if !registry.contains(ability) {
        return Err(SubmitError::NoHandler(ability));
    }

    check_shape(state, actor_id, spec.shape, target, false)?;
    let target = redirect_if_invisible(state, env, actor_id, spec.shape, target)?;

    let submission_index = state.round.next_submission_index();
    let priority = spec.priority;
    state.round.pending.push(PendingAction {
        actor: actor_id,
        kind: ability,
        target,
        spec,
        priority,
        submission_index,
    });
    if let Some(actor) = state.actor_mut(actor_id) {
        actor.flags.insert(RoundFlags::SUBMITTED_ACTION);
    }
    state.bump_nonce();
    Ok(())
}

/// Validates and queues the once-per-round racial action.
///
/// The racial queue is independent of the class queue: submitting one never
/// consumes the other. Use limits span the whole game.
///
/// # Errors
///
/// See [`SubmitError`].
pub fn submit_racial_action(
    state: &mut GameState,
    env: &SystemsEnv<'_>,
    registry: &RacialRegistry,
    actor_id: ActorId,
    target: Target,
) -> Result<(), SubmitError> {
    if !state.round.accepting {
        return Err(SubmitError::RoundClosed);
    }

    let actor = state
        .actor(actor_id)
        .ok_or(SubmitError::UnknownActor(actor_id))?;
    if !actor.alive {
        return Err(SubmitError::ActorDead(actor_id));
    }
    if !actor.can_act() {
        return Err(SubmitError::Incapacitated(actor_id));
    }
    if actor.flags.contains(RoundFlags::SUBMITTED_RACIAL) {
        return Err(SubmitError::AlreadySubmitted(actor_id));
    }

    let race = actor.race;
    let racial = env
        .abilities()?
        .racial_spec(race)
        .ok_or(SubmitError::RacialPassiveOnly)?;
    let action = racial.action.ok_or(SubmitError::RacialPassiveOnly)?;

    if actor.racial_uses >= action.uses {
        return Err(SubmitError::RacialExhausted);
    }
    if !registry.contains(race) {
        return Err(SubmitError::RacialPassiveOnly);
    }

    check_shape(state, actor_id, action.shape, target, true)?;

    state.round.racial.push(RacialAction {
        actor: actor_id,
        race,
        target,
    });
    if let Some(actor) = state.actor_mut(actor_id) {
        actor.flags.insert(RoundFlags::SUBMITTED_RACIAL);
    }
    state.bump_nonce();
    Ok(())
}

/// Checks a submitted target against the ability's declared shape.
///
/// `racial` tightens the rules: racial gifts are for the party and may never
/// aim at the monster.
fn check_shape(
    state: &GameState,
    actor_id: ActorId,
    shape: TargetShape,
    target: Target,
    racial: bool,
) -> Result<(), SubmitError> {
    match shape {
        TargetShape::Single => match target {
            Target::Player(id) => {
                let target_actor = state.actor(id).ok_or(SubmitError::UnknownTarget(id))?;
                if !target_actor.alive {
                    return Err(SubmitError::TargetDead);
                }
                Ok(())
            }
            Target::Monster => {
                if racial {
                    return Err(SubmitError::RacialTargetNotAllowed);
                }
                if !state.monster.is_alive() {
                    return Err(SubmitError::MonsterDead);
                }
                Ok(())
            }
            Target::AllAllies => Err(SubmitError::ShapeMismatch),
        },
        TargetShape::SelfOnly => {
            if target == Target::Player(actor_id) {
                Ok(())
            } else {
                Err(SubmitError::ShapeMismatch)
            }
        }
        TargetShape::AllAllies => {
            if target == Target::AllAllies {
                Ok(())
            } else {
                Err(SubmitError::ShapeMismatch)
            }
        }
        TargetShape::Monster | TargetShape::Area => {
            if target != Target::Monster {
                return Err(SubmitError::ShapeMismatch);
            }
            if racial {
                return Err(SubmitError::RacialTargetNotAllowed);
            }
            if !state.monster.is_alive() {
                return Err(SubmitError::MonsterDead);
            }
            Ok(())
        }
    }
}

/// Applies the invisibility redirect rule for single-target submissions.
///
/// A living, invisible player cannot be singled out; the submission silently
/// lands on a uniformly random visible player (or the monster). Self-targeted
/// submissions are exempt: a player can always reach themself.
fn redirect_if_invisible(
    state: &GameState,
    env: &SystemsEnv<'_>,
    actor_id: ActorId,
    shape: TargetShape,
    target: Target,
) -> Result<Target, SubmitError> {
    if shape != TargetShape::Single {
        return Ok(target);
    }
    let Target::Player(target_id) = target else {
        return Ok(target);
    };
    if target_id == actor_id {
        return Ok(target);
    }
    let hidden = state
        .actor(target_id)
        .is_some_and(|a| a.alive && a.effects.has(StatusKind::Invisible));
    if !hidden {
        return Ok(target);
    }

    let mut candidates: Vec<Target> = state
        .alive_actors()
        .filter(|a| a.id != target_id && !a.effects.has(StatusKind::Invisible))
        .map(|a| Target::Player(a.id))
        .collect();
    if state.monster.is_alive() {
        candidates.push(Target::Monster);
    }
    if candidates.is_empty() {
        return Err(SubmitError::NoVisibleTarget);
    }

    let seed = state.roll_seed(actor_id.0, seed_ctx::REDIRECT);
    let index = env.rng()?.pick(seed, candidates.len());
    Ok(candidates[index])
}
