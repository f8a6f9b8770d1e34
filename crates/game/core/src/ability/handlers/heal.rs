//! Healing handlers.

use crate::ability::{EffectContext, HandlerError};
use crate::combat::{HealInput, calculate_healing, describe_modifiers};
use crate::engine::LogKind;
use crate::state::Target;
use crate::status::{ChannelFold, ModifierChannel, StatusKind, StatusParams};

/// Snapshot of the healer-side pipeline inputs.
fn healer_inputs(ctx: &EffectContext<'_>) -> Result<(String, ChannelFold, bool), HandlerError> {
    let healer = ctx
        .state
        .actor(ctx.actor)
        .ok_or(HandlerError::TargetNotFound)?;
    Ok((
        healer.name.clone(),
        healer.effects.fold(ModifierChannel::OutgoingHealing),
        healer.effects.has(StatusKind::Blessed),
    ))
}

/// Direct single-target heal.
pub fn mend(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let (healer_name, healer_fold, healer_blessed) = healer_inputs(ctx)?;
    let coordination = ctx.coordination_healing_bonus();

    match ctx.target {
        Target::Player(target_id) => {
            let target = ctx
                .state
                .actor(target_id)
                .ok_or(HandlerError::TargetNotFound)?;
            if !target.alive {
                return Err(HandlerError::TargetNotAlive);
            }
            let target_name = target.name.clone();
            let outcome = calculate_healing(
                &HealInput {
                    base: ctx.params.power,
                    healer_fold,
                    healer_blessed,
                    coordination,
                    target_fold: target.effects.fold(ModifierChannel::IncomingHealing),
                },
                &ctx.balance.heal,
            );
            let restored = ctx
                .state
                .actor_mut(target_id)
                .map(|t| t.heal(outcome.amount))
                .unwrap_or(0);
            ctx.log.event(
                LogKind::Healing,
                format!(
                    "{healer_name}'s {} restores {restored} hp to {target_name}{}",
                    ctx.name,
                    describe_modifiers(&outcome.modifiers)
                ),
                Some(ctx.actor),
                Some(target_id),
            );
        }

        // Nothing stops a hidden saboteur from mending the monster; the act
        // itself is public and speaks volumes.
        Target::Monster => {
            if !ctx.state.monster.is_alive() {
                return Err(HandlerError::TargetNotAlive);
            }
            let outcome = calculate_healing(
                &HealInput {
                    base: ctx.params.power,
                    healer_fold,
                    healer_blessed,
                    coordination,
                    target_fold: ctx
                        .state
                        .monster
                        .effects
                        .fold(ModifierChannel::IncomingHealing),
                },
                &ctx.balance.heal,
            );
            let restored = ctx.state.monster.heal(outcome.amount);
            ctx.log.event(
                LogKind::Healing,
                format!(
                    "{healer_name}'s {} knits the monster's wounds for {restored} hp{}",
                    ctx.name,
                    describe_modifiers(&outcome.modifiers)
                ),
                Some(ctx.actor),
                None,
            );
        }

        Target::AllAllies => return Err(HandlerError::UnsupportedTarget),
    }

    Ok(())
}

/// Healing over time: applies Regenerating; the actual recovery happens on
/// the end-of-round tick, where a hidden-role healer risks detection.
pub fn renewal(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let healer_name = ctx.actor_name();
    let target_name = ctx.target_name();
    let params = StatusParams::flat(ctx.params.power as i32, ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Regenerating, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("regeneration did not take"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{healer_name}'s {} wraps {target_name} in regenerating light", ctx.name),
        Some(source),
        None,
    );
    Ok(())
}
