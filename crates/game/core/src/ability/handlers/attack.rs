//! Attack handlers.

use crate::ability::{EffectContext, HandlerError};
use crate::combat::{DamageInput, calculate_damage, describe_modifiers};
use crate::engine::LogKind;
use crate::env::seed_ctx;
use crate::state::{DeathCause, Target};
use crate::status::{ModifierChannel, StatusKind, StatusParams};

/// Handler-level tweaks on top of the shared attack flow.
#[derive(Clone, Copy, Debug, Default)]
struct AttackProfile {
    /// Grants the combo multiplier when the target is stunned.
    combo_on_stunned: bool,
}

pub fn strike(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    perform(ctx, AttackProfile::default())
}

pub fn cleave(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    perform(ctx, AttackProfile::default())
}

pub fn fireball(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    perform(ctx, AttackProfile::default())
}

/// Precision strike; the spec marks it armor-ignoring, and a stunned target
/// eats the combo multiplier.
pub fn backstab(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    perform(
        ctx,
        AttackProfile {
            combo_on_stunned: true,
        },
    )
}

/// Attack with a chance to freeze the target in place for a round.
pub fn frost_lance(ctx: &mut EffectContext<'_>) -> Result<(), HandlerError> {
    perform(ctx, AttackProfile::default())?;

    let seed = ctx.state.roll_seed(ctx.actor.0, seed_ctx::STATUS_PROC);
    if ctx.rng.percent_check(seed, ctx.params.percent) {
        let target_name = ctx.target_name();
        let duration = ctx.params.duration;
        let source = ctx.actor;
        if let Some(effects) = ctx.target_effects_mut()
            && effects
                .apply(StatusKind::Stunned, StatusParams::marker(duration), source)
                .is_some()
        {
            ctx.log.event(
                LogKind::Status,
                format!("{target_name} is frozen solid and cannot act"),
                Some(source),
                None,
            );
        }
    }
    Ok(())
}

/// Shared attack flow: snapshot the attacker, run the damage pipeline
/// against the resolved target, apply and log the result.
fn perform(ctx: &mut EffectContext<'_>, profile: AttackProfile) -> Result<(), HandlerError> {
    let attacker = ctx
        .state
        .actor(ctx.actor)
        .ok_or(HandlerError::TargetNotFound)?;
    let attacker_name = attacker.name.clone();
    let saboteur = attacker.saboteur;
    let attacker_fold = attacker.effects.fold(ModifierChannel::OutgoingDamage);
    let blessed = attacker.effects.has(StatusKind::Blessed);
    let luck = attacker.luck;
    let power = attacker.damage_multiplier;

    let comeback =
        (ctx.state.comeback_active && !saboteur).then_some(ctx.balance.comeback.bonus);
    let coordination = ctx.coordination_damage_bonus();
    let crit_seed = ctx.state.roll_seed(ctx.actor.0, seed_ctx::CRIT);

    match ctx.target {
        Target::Monster => {
            if !ctx.state.monster.is_alive() {
                return Err(HandlerError::TargetNotAlive);
            }
            let monster = &ctx.state.monster;
            let combo = (profile.combo_on_stunned && monster.effects.has(StatusKind::Stunned))
                .then_some(ctx.balance.stun_combo_multiplier);
            // A saboteur fakes the fight: their blows against the monster are
            // quietly discounted.
            let corruption = saboteur.then_some(ctx.balance.corruption_factor);
            let armor = (!ctx.params.ignore_armor)
                .then(|| monster.effects.modified(ModifierChannel::Armor, monster.armor));

            let input = DamageInput {
                base: ctx.params.power,
                attacker_power: power,
                attacker_fold: Some(attacker_fold),
                attacker_blessed: blessed,
                attacker_luck: luck,
                coordination,
                combo,
                comeback,
                corruption,
                armor,
                target_fold: monster.effects.fold(ModifierChannel::IncomingDamage),
                crit_seed,
            };
            let outcome = calculate_damage(&input, &ctx.balance.crit, ctx.rng);
            ctx.state.monster.apply_damage(outcome.amount);

            let crit_note = if outcome.critical { " (critical!)" } else { "" };
            ctx.log.event(
                LogKind::Damage,
                format!(
                    "{attacker_name}'s {} hits the monster for {} damage{}{}",
                    ctx.name,
                    outcome.amount,
                    crit_note,
                    describe_modifiers(&outcome.modifiers)
                ),
                Some(ctx.actor),
                None,
            );
            if corruption.is_some() {
                ctx.log.private(
                    LogKind::Corruption,
                    format!("{attacker_name} pulls the blow; the monster barely feels it"),
                    vec![ctx.actor],
                );
            }
        }

        Target::Player(target_id) => {
            let target = ctx
                .state
                .actor(target_id)
                .ok_or(HandlerError::TargetNotFound)?;
            if !target.alive {
                return Err(HandlerError::TargetNotAlive);
            }
            let target_name = target.name.clone();
            let combo = (profile.combo_on_stunned && target.effects.has(StatusKind::Stunned))
                .then_some(ctx.balance.stun_combo_multiplier);
            let armor = (!ctx.params.ignore_armor)
                .then(|| target.effects.modified(ModifierChannel::Armor, target.armor));

            let input = DamageInput {
                base: ctx.params.power,
                attacker_power: power,
                attacker_fold: Some(attacker_fold),
                attacker_blessed: blessed,
                attacker_luck: luck,
                coordination,
                combo,
                comeback,
                corruption: None,
                armor,
                target_fold: target.effects.fold(ModifierChannel::IncomingDamage),
                crit_seed,
            };
            let outcome = calculate_damage(&input, &ctx.balance.crit, ctx.rng);
            let source = ctx.actor;
            if let Some(target) = ctx.state.actor_mut(target_id) {
                target.apply_damage(outcome.amount, DeathCause::Player(source));
            }

            let crit_note = if outcome.critical { " (critical!)" } else { "" };
            ctx.log.event(
                LogKind::Damage,
                format!(
                    "{attacker_name}'s {} strikes {target_name} for {} damage{}{}",
                    ctx.name,
                    outcome.amount,
                    crit_note,
                    describe_modifiers(&outcome.modifiers)
                ),
                Some(source),
                Some(target_id),
            );
        }

        Target::AllAllies => return Err(HandlerError::UnsupportedTarget),
    }

    Ok(())
}
