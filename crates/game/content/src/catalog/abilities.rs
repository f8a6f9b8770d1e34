//! Per-ability numeric parameters.

use raid_core::status::{StatusKind, StatusParams};
use raid_core::{AbilityCategory, AbilityKind, AbilityParams, AbilitySpec, PassiveGrant, TargetShape};

/// Shorthand for the spec table below.
fn spec(
    kind: AbilityKind,
    category: AbilityCategory,
    shape: TargetShape,
    params: AbilityParams,
    priority: i8,
    cooldown: u8,
    unlock_level: u32,
) -> AbilitySpec {
    AbilitySpec {
        kind,
        category,
        shape,
        params,
        priority,
        cooldown,
        unlock_level,
        passive: None,
    }
}

/// Every class ability the shipped catalog knows.
///
/// Priorities put protection and support ahead of strikes: shields and
/// blessings land before the blows they are meant to shape.
pub(super) fn ability_specs() -> Vec<AbilitySpec> {
    use AbilityCategory::*;
    use AbilityKind::*;
    use TargetShape::*;

    vec![
        // ==== Warrior ====
        spec(Strike, Attack, Single, AbilityParams::damage(12), 5, 0, 1),
        spec(
            ShieldWall,
            Defense,
            Single,
            AbilityParams::status(6, 0.0, 2),
            8,
            1,
            1,
        ),
        spec(Cleave, Attack, Area, AbilityParams::damage(18), 4, 2, 2),
        AbilitySpec {
            kind: Bulwark,
            category: Defense,
            shape: SelfOnly,
            params: AbilityParams::status(2, 0.0, StatusParams::PERMANENT),
            priority: 0,
            cooldown: 0,
            unlock_level: 3,
            passive: Some(PassiveGrant {
                effect: StatusKind::Fortified,
                params: StatusParams::flat(2, StatusParams::PERMANENT),
            }),
        },
        spec(
            BattleCry,
            Special,
            AllAllies,
            AbilityParams::status(0, 0.20, 2),
            7,
            3,
            3,
        ),
        // ==== Mage ====
        spec(
            FrostLance,
            Attack,
            Single,
            AbilityParams::status(10, 0.35, 1),
            3,
            0,
            1,
        ),
        spec(Hex, Special, Single, AbilityParams::status(0, 0.25, 2), 6, 1, 1),
        spec(Fireball, Attack, Monster, AbilityParams::damage(20), 2, 2, 2),
        spec(Curse, Special, Single, AbilityParams::status(0, 0.5, 2), 6, 2, 3),
        // ==== Cleric ====
        spec(Mend, Heal, Single, AbilityParams::damage(15), 6, 0, 1),
        spec(
            Blessing,
            Special,
            Single,
            AbilityParams::status(0, 0.0, 2),
            7,
            2,
            1,
        ),
        spec(Renewal, Heal, Single, AbilityParams::status(6, 0.0, 3), 6, 1, 2),
        spec(Purify, Special, Single, AbilityParams::damage(0), 8, 1, 3),
        // ==== Rogue ====
        spec(
            Backstab,
            Attack,
            Single,
            AbilityParams {
                power: 16,
                percent: 0.0,
                duration: 0,
                ignore_armor: true,
            },
            3,
            1,
            1,
        ),
        spec(
            PoisonBlade,
            Special,
            Single,
            AbilityParams::status(5, 0.0, 3),
            4,
            1,
            1,
        ),
        spec(Vanish, Defense, SelfOnly, AbilityParams::status(0, 0.0, 2), 9, 3, 2),
    ]
}
