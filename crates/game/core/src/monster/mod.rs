//! Monster behavior.
//!
//! The monster acts once per round after the party: it ages, then either
//! strikes one visible target or, on its sweep tier, rakes the entire
//! line. All of its damage routes through the same pipeline as player
//! attacks, scaled by party level and size.

use crate::combat::{DamageInput, calculate_damage, describe_modifiers, monster_attack_damage};
use crate::engine::{LogKind, RoundLog};
use crate::env::{BalanceParams, ComebackParams, RngOracle, seed_ctx};
use crate::state::{ActorId, DeathCause, GameState, MONSTER_ACTOR, MONSTER_SEED_ID};
use crate::status::{ModifierChannel, StatusKind, StatusParams};

/// Derives the comeback condition: the loyal side fights harder while its
/// aggregate health fraction sits below the threshold.
pub fn comeback_active(state: &GameState, params: &ComebackParams) -> bool {
    state.loyal_health_fraction() < params.threshold
}

/// Executes the monster's turn. The caller skips this entirely when the
/// monster is already dead.
pub fn act(
    state: &mut GameState,
    balance: &BalanceParams,
    rng: &dyn RngOracle,
    log: &mut RoundLog,
) {
    state.monster.age += 1;

    if state.monster.effects.prevents_action() {
        log.public(
            LogKind::Monster,
            "The monster reels, stunned and thrashing",
        );
        state.bump_nonce();
        return;
    }

    let base = monster_attack_damage(
        state.monster.base_damage,
        state.level,
        state.living_player_count(),
        &balance.monster,
    );

    let sweeping = balance.monster.sweep_interval > 0
        && state.monster.age % balance.monster.sweep_interval == 0;

    if sweeping {
        let per_target = ((base as f64) * balance.monster.sweep_factor).floor().max(1.0) as u32;
        let targets: Vec<ActorId> = state.alive_actors().map(|a| a.id).collect();
        if targets.is_empty() {
            state.bump_nonce();
            return;
        }
        log.public(
            LogKind::Monster,
            "The monster rears back and sweeps the whole line!",
        );
        // The sweep finds everyone; invisibility only cheats single strikes.
        for target_id in targets {
            strike(state, balance, rng, log, target_id, per_target);
            if let Some(target) = state.actor_mut(target_id)
                && target.alive
            {
                target.effects.apply(
                    StatusKind::Weakened,
                    StatusParams::fraction(
                        balance.monster.sweep_weaken_percent,
                        balance.monster.sweep_weaken_turns,
                    ),
                    MONSTER_ACTOR,
                );
            }
            state.bump_nonce();
        }
        log.public(
            LogKind::Status,
            "The battered line fights on with weakened arms",
        );
        return;
    }

    let candidates: Vec<ActorId> = state
        .alive_actors()
        .filter(|a| !a.effects.has(StatusKind::Invisible))
        .map(|a| a.id)
        .collect();
    if candidates.is_empty() {
        log.public(
            LogKind::Monster,
            "The monster snaps at shadows and finds no one to strike",
        );
        state.bump_nonce();
        return;
    }

    let seed = state.roll_seed(MONSTER_SEED_ID, seed_ctx::MONSTER_TARGET);
    let target_id = candidates[rng.pick(seed, candidates.len())];
    strike(state, balance, rng, log, target_id, base);
    state.bump_nonce();
}

/// One monster hit against one player, through the damage pipeline.
fn strike(
    state: &mut GameState,
    balance: &BalanceParams,
    rng: &dyn RngOracle,
    log: &mut RoundLog,
    target_id: ActorId,
    base: u32,
) {
    let attacker_fold = state.monster.effects.fold(ModifierChannel::OutgoingDamage);
    let attacker_blessed = state.monster.effects.has(StatusKind::Blessed);
    let Some(target) = state.actor(target_id) else {
        return;
    };
    let target_name = target.name.clone();
    let armor = Some(target.effects.modified(ModifierChannel::Armor, target.armor));

    let input = DamageInput {
        base,
        attacker_power: 1.0,
        attacker_fold: Some(attacker_fold),
        attacker_blessed,
        attacker_luck: 0,
        coordination: None,
        combo: None,
        comeback: None,
        corruption: None,
        armor,
        target_fold: target.effects.fold(ModifierChannel::IncomingDamage),
        crit_seed: state.roll_seed(MONSTER_SEED_ID, seed_ctx::CRIT),
    };
    let outcome = calculate_damage(&input, &balance.crit, rng);

    if let Some(target) = state.actor_mut(target_id) {
        target.apply_damage(outcome.amount, DeathCause::Monster);
    }

    let crit_note = if outcome.critical { " (critical!)" } else { "" };
    log.event(
        LogKind::Damage,
        format!(
            "The monster savages {target_name} for {} damage{}{}",
            outcome.amount,
            crit_note,
            describe_modifiers(&outcome.modifiers)
        ),
        None,
        Some(target_id),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MonsterState;

    #[test]
    fn comeback_tracks_loyal_health_threshold() {
        use crate::ability::{ClassKind, RaceKind};
        use crate::env::ClassBaseline;
        use crate::state::{ActorState, PartyMemberSpec, RoundState};

        let baseline = ClassBaseline {
            max_hp: 100,
            armor: 0,
            luck: 0,
        };
        let member = |id: u32, saboteur: bool| PartyMemberSpec {
            id: ActorId(id),
            name: format!("p{id}"),
            class: ClassKind::Warrior,
            race: RaceKind::Human,
            saboteur,
        };
        let mut actors = vec![
            ActorState::new(&member(1, false), baseline),
            ActorState::new(&member(2, false), baseline),
            ActorState::new(&member(3, true), baseline),
        ];
        // Loyal team at 30/200 aggregate; the saboteur's full bar is ignored.
        actors[0].hp = 20;
        actors[1].hp = 10;

        let state = GameState {
            actors,
            monster: MonsterState::spawn(&BalanceParams::default().monster, 3),
            level: 1,
            round: RoundState::new(),
            comeback_active: false,
            game_seed: 7,
            nonce: 0,
        };
        let params = ComebackParams::default();
        assert!(comeback_active(&state, &params));

        let mut healthy = state.clone();
        healthy.actors[0].hp = 100;
        healthy.actors[1].hp = 100;
        assert!(!comeback_active(&healthy, &params));
    }
}
