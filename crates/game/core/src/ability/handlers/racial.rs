//! Racial action handlers.
//!
//! Resolved in their own phase before class actions; validated by the
//! parallel racial queue. The Revenant has no entry here: its gift is the
//! passive one-use resurrection applied at setup.

use crate::ability::{EffectContext, HandlerError};
use crate::combat::{HealInput, calculate_healing};
use crate::engine::LogKind;
use crate::env::seed_ctx;
use crate::state::{DeathCause, Target};
use crate::status::{ChannelFold, ModifierChannel, StatusKind, StatusParams};

/// Human: a small heal across the whole party.
pub fn rally(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let healer = ctx
        .state
        .actor(ctx.actor)
        .ok_or(HandlerError::TargetNotFound)?;
    let healer_name = healer.name.clone();
    let healer_fold = healer.effects.fold(ModifierChannel::OutgoingHealing);
    let healer_blessed = healer.effects.has(StatusKind::Blessed);

    let mut total = 0u32;
    for id in ctx.all_allies() {
        let target_fold = match ctx.state.actor(id) {
            Some(a) => a.effects.fold(ModifierChannel::IncomingHealing),
            None => ChannelFold::IDENTITY,
        };
        let outcome = calculate_healing(
            &HealInput {
                base: ctx.params.power,
                healer_fold,
                healer_blessed,
                coordination: None,
                target_fold,
            },
            &ctx.balance.heal,
        );
        if let Some(ally) = ctx.state.actor_mut(id) {
            total += ally.heal(outcome.amount);
        }
    }

    ctx.log.event(
        LogKind::Healing,
        format!("{healer_name}'s {} restores {total} hp across the party", ctx.name),
        Some(ctx.actor),
        None,
    );
    Ok(())
}

/// Dwarf: stone skin shrugs off a share of incoming damage for a few rounds.
pub fn stoneskin(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let params = StatusParams::fraction(ctx.params.percent, ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Resistant, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("skin is already stone"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name}'s skin hardens to living stone"),
        Some(source),
        None,
    );
    Ok(())
}

/// Elf: a private read on another player's loyalty.
///
/// Success tells only the elf; the target's public `revealed` flag is
/// untouched, so table talk stays a matter of trust.
pub fn insight(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let Target::Player(target_id) = ctx.target else {
        return Err(HandlerError::UnsupportedTarget);
    };
    let target = ctx
        .state
        .actor(target_id)
        .ok_or(HandlerError::TargetNotFound)?;
    if !target.alive {
        return Err(HandlerError::TargetNotAlive);
    }
    let target_name = target.name.clone();
    let target_saboteur = target.saboteur;

    let seed = ctx.state.roll_seed(ctx.actor.0, seed_ctx::INSIGHT);
    let message = if ctx.rng.percent_check(seed, ctx.params.percent) {
        if target_saboteur {
            format!("your senses sharpen: {target_name} reeks of treachery")
        } else {
            format!("your senses sharpen: {target_name} is true to the party")
        }
    } else {
        format!("you study {target_name}, but learn nothing certain")
    };
    ctx.log.private(LogKind::Reveal, message, vec![ctx.actor]);
    Ok(())
}

/// Orc: a self-damaging frenzy that boosts outgoing damage.
pub fn bloodrage(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let params = StatusParams::fraction(ctx.params.percent, ctx.params.duration);
    let source = ctx.actor;
    let toll = ctx.params.power;

    let actor = ctx
        .state
        .actor_mut(source)
        .ok_or(HandlerError::TargetNotFound)?;
    if actor
        .effects
        .apply(StatusKind::Empowered, params, source)
        .is_none()
    {
        return Err(HandlerError::EffectRejected("the rage is already burning"));
    }
    actor.apply_damage(toll, DeathCause::Player(source));

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name} bleeds {toll} hp into a battle frenzy"),
        Some(source),
        None,
    );
    Ok(())
}
