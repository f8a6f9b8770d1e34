//! Defense handlers.

use crate::ability::{EffectContext, HandlerError};
use crate::engine::LogKind;
use crate::status::{StatusKind, StatusParams};

/// Flat armor buff on a single target.
pub fn shield_wall(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let target_name = ctx.target_name();
    let params = StatusParams::flat(ctx.params.power as i32, ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Fortified, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("fortification did not take"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name} raises a {} around {target_name}", ctx.name),
        Some(source),
        None,
    );
    Ok(())
}

/// Self-invisibility: single-target submissions against the bearer are
/// redirected until the effect wears off.
pub fn vanish(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    let actor_name = ctx.actor_name();
    let params = StatusParams::marker(ctx.params.duration);
    let source = ctx.actor;

    let applied = ctx
        .target_effects_mut()
        .ok_or(HandlerError::UnsupportedTarget)?
        .apply(StatusKind::Invisible, params, source)
        .is_some();
    if !applied {
        return Err(HandlerError::EffectRejected("already unseen"));
    }

    ctx.log.event(
        LogKind::Status,
        format!("{actor_name} melts into the shadows"),
        Some(source),
        None,
    );
    Ok(())
}
