//! Level progression after a monster defeat.

use super::log::{LogKind, RoundLog};
use crate::config::GameConfig;
use crate::env::{AbilityOracle, BalanceParams};
use crate::state::GameState;

/// What the progression phase decided this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressionOutcome {
    /// The monster's health hit zero this round.
    pub monster_defeated: bool,
    /// A level was awarded and the next encounter spawned.
    pub level_up: bool,
}

/// Checks the monster's fate and, below the level cap, awards a level:
/// surviving non-saboteurs are healed and upgraded, new kit abilities
/// unlock (passives activate), and a scaled encounter respawns.
pub fn run(
    state: &mut GameState,
    config: &GameConfig,
    abilities: &(impl AbilityOracle + ?Sized),
    balance: &BalanceParams,
    log: &mut RoundLog,
) -> ProgressionOutcome {
    if state.monster.is_alive() {
        return ProgressionOutcome::default();
    }

    log.public(LogKind::Monster, "The monster crashes down, defeated!");

    if state.level >= config.level_cap {
        // Final encounter: no respawn, the win check will end the game.
        return ProgressionOutcome {
            monster_defeated: true,
            level_up: false,
        };
    }

    state.level += 1;
    let level = state.level;
    log.public(LogKind::Progression, format!("The party reaches level {level}"));

    for actor in state.actors.iter_mut().filter(|a| a.alive && !a.saboteur) {
        actor.hp = actor.max_hp;
        actor.damage_multiplier += balance.level_damage_bonus;
    }
    log.public(
        LogKind::Progression,
        "The loyal survivors are restored and emboldened by victory",
    );

    // Unlocks reach everyone still standing; withholding them from hidden
    // saboteurs would give the game away.
    for idx in 0..state.actors.len() {
        if !state.actors[idx].alive {
            continue;
        }
        let class = state.actors[idx].class;
        let kit: Vec<_> = abilities.class_abilities(class).to_vec();
        for kind in kit {
            let Some(spec) = abilities.ability_spec(kind) else {
                continue;
            };
            if spec.unlock_level != level {
                continue;
            }
            let actor = &mut state.actors[idx];
            let name = actor.name.clone();
            let id = actor.id;
            if let Some(grant) = &spec.passive {
                if actor.effects.apply(grant.effect, grant.params, id).is_some() {
                    log.event(
                        LogKind::Progression,
                        format!("{name}'s {kind} awakens"),
                        None,
                        Some(id),
                    );
                }
            } else {
                actor.learn(spec);
                log.event(
                    LogKind::Progression,
                    format!("{name} learns {kind}"),
                    None,
                    Some(id),
                );
            }
        }
    }

    state.monster.respawn_scaled(balance.monster.growth);
    log.public(
        LogKind::Monster,
        format!(
            "A mightier monster answers the challenge ({} hp)",
            state.monster.max_hp
        ),
    );

    ProgressionOutcome {
        monster_defeated: true,
        level_up: true,
    }
}
