//! Special-category handlers: party buffs, debuffs, cleansing.

use crate::ability::{EffectContext, HandlerError};
use crate::engine::LogKind;
use crate::status::{StatusKind, StatusParams};

/// Party-wide outgoing-damage buff.
pub fn battle_cry(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let params = StatusParams::fraction(ctx.params.percent, ctx.params.duration);
    let source = ctx.actor;

    let mut buffed = 0usize;
    for id in ctx.all_allies() {
        if let Some(ally) = ctx.state.actor_mut(id)
            && ally
                .effects
                .apply(StatusKind::Empowered, params, source)
                .is_some()
        {
            buffed += 1;
        }
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name}'s {} emboldens {buffed} allies", ctx.name),
        Some(source),
        None,
    );
    Ok(())
}

/// Vulnerability debuff on a single target.
pub fn hex(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let target_name = ctx.target_name();
    let params = StatusParams::fraction(ctx.params.percent, ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Vulnerable, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("the hex did not take"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name}'s {} leaves {target_name} vulnerable", ctx.name),
        Some(source),
        None,
    );
    Ok(())
}

/// Curse: the target's incoming healing is cut until it wears off.
pub fn curse(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let target_name = ctx.target_name();
    let params = StatusParams::fraction(ctx.params.percent, ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Cursed, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("the curse did not take"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name}'s {} sours every salve laid on {target_name}", ctx.name),
        Some(source),
        None,
    );
    Ok(())
}

/// Blessing: doubled crit chance and amplified healing for the bearer.
pub fn blessing(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let target_name = ctx.target_name();
    let params = StatusParams::marker(ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Blessed, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("already blessed"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name} blesses {target_name}"),
        Some(source),
        None,
    );
    Ok(())
}

/// Poison coating: damage arrives on the end-of-round ticks, stacking with
/// further applications.
pub fn poison_blade(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let target_name = ctx.target_name();
    let params = StatusParams::flat(ctx.params.power as i32, ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Poisoned, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("the venom finds no purchase"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name}'s {} sinks venom into {target_name}", ctx.name),
        Some(source),
        None,
    );
    Ok(())
}

/// Kinds stripped by a cleanse.
const PURGEABLE: [StatusKind; 5] = [
    StatusKind::Poisoned,
    StatusKind::Cursed,
    StatusKind::Vulnerable,
    StatusKind::Weakened,
    StatusKind::Stunned,
];

/// Removes hostile effects from a single target.
pub fn purify(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let target_name = ctx.target_name();
    let source = ctx.actor;

    let effects = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?;
    let mut removed = 0usize;
    for kind in PURGEABLE {
        removed += effects.remove_kind(kind);
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name}'s {} cleanses {removed} afflictions from {target_name}", ctx.name),
        Some(source),
        None,
    );
    Ok(())
}
